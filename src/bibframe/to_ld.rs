//! BIBFRAME to resource graph conversion.
//!
//! [`LdMapper`] walks the wire graph from every subject matching a profile
//! root. For each resource it collects the declared properties, recurses
//! into declared edges through the unit registered for each edge, derives
//! the label, and assigns the content fingerprint last.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::converter::Converter;
use crate::error::{ConversionError, Result};
use crate::mock;
use crate::profile::{best_match, EdgeMapping};
use crate::report::{ConversionReport, Omission, OmissionReason};
use crate::resource::{Resource, ResourceGraph, ResourceId};
use crate::units::{Direction, EdgeContext, MapperUnit};

use super::namespaces::rdf;
use super::rdf::{GraphIndex, RdfGraph, RdfNode};

/// Wire→internal walker state for one conversion.
#[derive(Debug)]
pub struct LdMapper<'a> {
    converter: &'a Converter,
    index: GraphIndex<'a>,
    graph: ResourceGraph,
    report: ConversionReport,
    visiting: HashSet<RdfNode>,
}

impl<'a> LdMapper<'a> {
    pub(crate) fn new(converter: &'a Converter, rdf: &'a RdfGraph) -> Self {
        Self {
            converter,
            index: GraphIndex::new(rdf),
            graph: ResourceGraph::new(),
            report: ConversionReport::default(),
            visiting: HashSet::new(),
        }
    }

    /// Converts every subject matching a profile root.
    pub(crate) fn run(mut self) -> Result<(ResourceGraph, ConversionReport)> {
        let converter = self.converter;
        for root in &converter.profile().roots {
            let subjects: Vec<RdfNode> = self
                .index
                .subjects_with_types(&root.bf_resource_def.type_set)
                .into_iter()
                .cloned()
                .collect();
            for subject in subjects {
                if let Some(id) = self.map_resource(&subject, root)? {
                    debug!(subject = %subject, id = %id, "converted root");
                    self.graph.add_root(id);
                }
            }
        }
        Ok((self.graph, self.report))
    }

    /// Returns the converter driving this walk.
    #[must_use]
    pub fn converter(&self) -> &'a Converter {
        self.converter
    }

    /// Returns the wire graph index.
    #[must_use]
    pub fn index(&self) -> &GraphIndex<'a> {
        &self.index
    }

    /// Returns the resources finalized so far.
    #[must_use]
    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    /// Converts one wire node through the unit registered for `edge`.
    ///
    /// Literals are never resources. For `fetchRemote` edges an IRI node
    /// with no description beyond its types is looked up through the
    /// resolver, falling back to a mock.
    ///
    /// # Errors
    ///
    /// Returns configuration and unsupported-data errors, and omissions in
    /// strict mode.
    pub fn map_resource(
        &mut self,
        node: &RdfNode,
        edge: &EdgeMapping,
    ) -> Result<Option<ResourceId>> {
        if node.is_literal() {
            return Ok(None);
        }
        let converter = self.converter;
        let unit = converter
            .registry()
            .resolve(&edge.ld_resource_def, &edge.bf_resource_def)?;
        if edge.fetch_remote && self.is_external(node) {
            return Ok(Some(self.map_external(node, edge, unit)));
        }
        unit.to_ld(self, node, edge)
    }

    /// Builds the unfinalized resource for a wire node: types, properties,
    /// and every declared edge. Returns `None` if the node is already being
    /// built further up the walk.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::UnsupportedData`] if the node carries a
    /// type the edge declares unsupported.
    pub fn build(&mut self, node: &RdfNode, edge: &EdgeMapping) -> Result<Option<Resource>> {
        let bf = &edge.bf_resource_def;
        if !bf.unsupported_types.is_empty() {
            let node_types = self.index.types_of(node);
            if let Some(rdf_type) = bf.unsupported_types.intersection(&node_types).next() {
                return Err(ConversionError::UnsupportedData {
                    node: node.to_string(),
                    rdf_type: rdf_type.clone(),
                });
            }
        }
        if !self.visiting.insert(node.clone()) {
            self.omit(&node.to_string(), OmissionReason::Cycle)?;
            return Ok(None);
        }

        let mut draft = Resource::new(edge.ld_resource_def.type_set.iter().cloned());
        let mapping = &edge.resource_mapping;
        for property in &mapping.properties {
            for value in self.index.objects(node, &property.bf_property) {
                draft.add_property(property.ld_property.clone(), value.value());
            }
        }

        let result = self
            .map_edges(node, &mapping.outgoing_edges, Direction::Outgoing, &mut draft)
            .and_then(|()| {
                self.map_edges(node, &mapping.incoming_edges, Direction::Incoming, &mut draft)
            });
        self.visiting.remove(node);
        result?;
        Ok(Some(draft))
    }

    fn map_edges(
        &mut self,
        node: &RdfNode,
        edges: &[EdgeMapping],
        direction: Direction,
        draft: &mut Resource,
    ) -> Result<()> {
        let converter = self.converter;
        for edge in edges {
            let ctx = EdgeContext {
                node,
                edge,
                siblings: edges,
                direction,
            };
            let unit = converter
                .registry()
                .resolve(&edge.ld_resource_def, &edge.bf_resource_def)?;
            unit.map_edge_to_ld(self, &ctx, draft)?;
        }
        Ok(())
    }

    /// Generic edge collection: every node reached through the edge's wire
    /// predicate that this edge claims is converted and linked.
    ///
    /// # Errors
    ///
    /// Propagates errors from converting the far ends.
    pub fn map_edge_default(&mut self, ctx: &EdgeContext<'_>, draft: &mut Resource) -> Result<()> {
        let (Some(bf_predicate), Some(ld_predicate)) =
            (ctx.edge.bf_predicate(), ctx.edge.ld_predicate())
        else {
            return Ok(());
        };
        let candidates: Vec<RdfNode> = match ctx.direction {
            Direction::Outgoing => self.index.objects(ctx.node, bf_predicate),
            Direction::Incoming => self.index.subjects(bf_predicate, ctx.node),
        }
        .into_iter()
        .cloned()
        .collect();

        for candidate in candidates {
            if !self.claims(ctx, &candidate) {
                continue;
            }
            let Some(id) = self.map_resource(&candidate, ctx.edge)? else {
                continue;
            };
            match ctx.direction {
                Direction::Outgoing => draft.add_outgoing(ld_predicate, id),
                Direction::Incoming => draft.add_incoming(ld_predicate, id),
            }
        }
        Ok(())
    }

    /// Returns true if `ctx.edge` is the best match for `node` among the
    /// sibling edges sharing both of its predicates: its wire type set must
    /// be the largest one contained in the node's types.
    #[must_use]
    pub fn claims(&self, ctx: &EdgeContext<'_>, node: &RdfNode) -> bool {
        if node.is_literal() {
            return false;
        }
        let node_types = self.index.types_of(node);
        let competing = ctx.siblings.iter().filter(|sibling| {
            sibling.bf_predicate() == ctx.edge.bf_predicate()
                && sibling.ld_predicate() == ctx.edge.ld_predicate()
        });
        best_match(competing, |sibling| &sibling.bf_resource_def.type_set, &node_types)
            .is_some_and(|chosen| std::ptr::eq(chosen, ctx.edge))
    }

    /// Stores a built resource under its fingerprint.
    pub fn finalize(&mut self, mut draft: Resource, label: String) -> ResourceId {
        draft.label = label;
        self.graph.add(draft, self.converter.fingerprinter())
    }

    /// Records an omission; fails instead in strict mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::StrictOmission`] in strict mode.
    pub fn omit(&mut self, node: &str, reason: OmissionReason) -> Result<()> {
        warn!(node, reason = %reason, "omitted from conversion");
        let omission = Omission {
            node: node.to_string(),
            reason,
        };
        if self.converter.config().strict {
            return Err(ConversionError::StrictOmission(omission.to_string()));
        }
        self.report.omissions.push(omission);
        Ok(())
    }

    /// An IRI the document says nothing about beyond its types.
    fn is_external(&self, node: &RdfNode) -> bool {
        node.is_uri()
            && self
                .index
                .matching(Some(node), None, None)
                .iter()
                .all(|triple| triple.predicate == rdf::TYPE)
    }

    fn map_external(
        &mut self,
        node: &RdfNode,
        edge: &EdgeMapping,
        unit: &dyn MapperUnit,
    ) -> ResourceId {
        let key = mock::external_key(node.value(), edge.bf_namespace.as_deref());
        let converter = self.converter;
        let fragment = converter
            .resolver()
            .and_then(|resolver| resolver.resolve(&key))
            .filter(|fragment| fragment.roots().next().is_some());
        if let Some(fragment) = fragment {
            if let Some(root) = self.graph.merge(fragment).into_iter().next() {
                if let Some(resolved) = self.graph.get(root).cloned() {
                    let rebuilt = unit.rebuild(resolved, &self.graph, converter.labels());
                    debug!(key = %key, "resolved external reference");
                    return self.graph.add(rebuilt, converter.fingerprinter());
                }
            }
        }
        debug!(key = %key, node = %node, "created mock for external reference");
        self.report.record_mock(&key);
        mock::insert_mock(
            &mut self.graph,
            edge.ld_resource_def.type_set.iter().cloned(),
            &key,
            converter.fingerprinter(),
        )
    }
}
