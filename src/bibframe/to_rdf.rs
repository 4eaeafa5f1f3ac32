//! Resource graph to BIBFRAME conversion.
//!
//! [`RdfMapper`] mirrors [`LdMapper`](super::to_ld::LdMapper): for every
//! root it finds the profile root mapping, emits the wire types and one
//! triple per property value, and for every link matched by a declared edge
//! emits the far end through its unit and connects the two wire nodes. A
//! resource reached through several links is emitted once.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::converter::Converter;
use crate::error::{ConversionError, Result};
use crate::mock;
use crate::profile::{best_match, EdgeMapping, ObjectKind};
use crate::report::{ConversionReport, Omission, OmissionReason};
use crate::resource::{Link, Resource, ResourceGraph, ResourceId};
use crate::units::{Direction, EmitContext};

use super::namespaces::rdf;
use super::rdf::{RdfGraph, RdfNode};

/// Internal→wire walker state for one conversion.
#[derive(Debug)]
pub struct RdfMapper<'a> {
    converter: &'a Converter,
    source: &'a ResourceGraph,
    graph: RdfGraph,
    report: ConversionReport,
    emitted: HashMap<ResourceId, RdfNode>,
}

impl<'a> RdfMapper<'a> {
    pub(crate) fn new(converter: &'a Converter, source: &'a ResourceGraph) -> Self {
        Self {
            converter,
            source,
            graph: RdfGraph::new(),
            report: ConversionReport::default(),
            emitted: HashMap::new(),
        }
    }

    /// Emits every root of the source graph.
    pub(crate) fn run(self) -> Result<(RdfGraph, ConversionReport)> {
        let roots: Vec<ResourceId> = self.source.roots().collect();
        self.run_for(&roots)
    }

    /// Emits the given resources as roots.
    pub(crate) fn run_for(mut self, roots: &[ResourceId]) -> Result<(RdfGraph, ConversionReport)> {
        let converter = self.converter;
        let source = self.source;
        for &id in roots {
            let Some(resource) = source.get(id) else {
                self.omit(&id.to_string(), OmissionReason::DanglingLink(id))?;
                continue;
            };
            let Some(root) = converter.profile().root_for_types(&resource.types) else {
                self.omit(&id.to_string(), OmissionReason::NoRootMapping)?;
                continue;
            };
            let node = self.emit_dispatched(id, root)?;
            debug!(id = %id, node = %node, "emitted root");
        }
        Ok((self.graph, self.report))
    }

    /// Returns the converter driving this walk.
    #[must_use]
    pub fn converter(&self) -> &'a Converter {
        self.converter
    }

    /// Returns the resource graph being written.
    #[must_use]
    pub fn source(&self) -> &'a ResourceGraph {
        self.source
    }

    /// Returns the wire graph under construction.
    pub fn graph_mut(&mut self) -> &mut RdfGraph {
        &mut self.graph
    }

    /// Wire node naming: `{base}resource/{id}` with a base URI, otherwise a
    /// blank node named after the id.
    #[must_use]
    pub fn node_for(&self, id: ResourceId) -> RdfNode {
        match self.converter.config().base_uri.as_deref() {
            Some(base) => RdfNode::uri(format!("{base}resource/{id}")),
            None => RdfNode::blank(format!("r{id}")),
        }
    }

    /// Returns the wire node already emitted for a resource.
    #[must_use]
    pub fn emitted(&self, id: ResourceId) -> Option<RdfNode> {
        self.emitted.get(&id).cloned()
    }

    /// Records the wire node of a resource so later links reuse it.
    pub fn remember(&mut self, id: ResourceId, node: RdfNode) {
        self.emitted.insert(id, node);
    }

    /// Emits `rdf:type` for every wire type of the edge.
    pub fn emit_types(&mut self, node: &RdfNode, edge: &EdgeMapping) {
        for type_iri in &edge.bf_resource_def.type_set {
            let object = RdfNode::uri(type_iri.clone());
            if !self.graph.contains(node, rdf::TYPE, &object) {
                self.graph.add_type(node, type_iri.clone());
            }
        }
    }

    /// Emits a resource through the unit registered for `edge`.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors and unit failures.
    pub fn emit_dispatched(&mut self, id: ResourceId, edge: &EdgeMapping) -> Result<RdfNode> {
        let converter = self.converter;
        let unit = converter
            .registry()
            .resolve(&edge.ld_resource_def, &edge.bf_resource_def)?;
        unit.to_rdf(self, id, edge)
    }

    /// Generic emission: types, properties, and every matched link.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::UnresolvedReference`] if `id` is not in the
    /// source graph.
    pub fn emit_resource(&mut self, id: ResourceId, edge: &EdgeMapping) -> Result<RdfNode> {
        if let Some(node) = self.emitted(id) {
            return Ok(node);
        }
        let source = self.source;
        let resource = source
            .get(id)
            .ok_or_else(|| ConversionError::UnresolvedReference(id.to_string()))?;
        if resource.is_mock() {
            return self.emit_mock(id, resource, edge);
        }

        let node = self.node_for(id);
        self.remember(id, node.clone());
        self.emit_types(&node, edge);
        for property in &edge.resource_mapping.properties {
            for value in resource.property(&property.ld_property).unwrap_or_default() {
                let object = match property.object {
                    ObjectKind::Literal => RdfNode::literal(value.clone()),
                    ObjectKind::Iri => RdfNode::uri(value.clone()),
                };
                self.graph.add(node.clone(), property.bf_property.clone(), object);
            }
        }

        let mapping = &edge.resource_mapping;
        for link in &resource.outgoing {
            self.emit_link(resource, &node, link, &mapping.outgoing_edges, Direction::Outgoing)?;
        }
        for link in &resource.incoming {
            self.emit_link(resource, &node, link, &mapping.incoming_edges, Direction::Incoming)?;
        }
        Ok(node)
    }

    fn emit_link(
        &mut self,
        parent: &Resource,
        parent_node: &RdfNode,
        link: &Link,
        edges: &[EdgeMapping],
        direction: Direction,
    ) -> Result<()> {
        let source = self.source;
        let Some(other) = source.get(link.node) else {
            return self.omit(&link.node.to_string(), OmissionReason::DanglingLink(link.node));
        };
        let candidates = edges
            .iter()
            .filter(|edge| edge.ld_predicate() == Some(link.predicate.as_str()));
        let Some(edge) =
            best_match(candidates, |edge| &edge.ld_resource_def.type_set, &other.types)
        else {
            trace!(predicate = %link.predicate, node = %link.node, "no edge mapping for link");
            return Ok(());
        };
        let ctx = EmitContext {
            parent,
            parent_node,
            link,
            edge,
            direction,
        };
        let converter = self.converter;
        let unit = converter
            .registry()
            .resolve(&edge.ld_resource_def, &edge.bf_resource_def)?;
        unit.emit_edge(self, &ctx)
    }

    /// Generic link emission: emit the far end and connect it under the
    /// edge's wire predicate, from parent to child for outgoing links and
    /// from child to parent for incoming ones.
    ///
    /// # Errors
    ///
    /// Propagates errors from emitting the far end.
    pub fn emit_edge_default(&mut self, ctx: &EmitContext<'_>) -> Result<()> {
        let Some(predicate) = ctx.edge.bf_predicate() else {
            return Ok(());
        };
        let other = self.emit_dispatched(ctx.link.node, ctx.edge)?;
        match ctx.direction {
            Direction::Outgoing => self.graph.add(ctx.parent_node.clone(), predicate, other),
            Direction::Incoming => self.graph.add(other, predicate, ctx.parent_node.clone()),
        }
        Ok(())
    }

    /// A mock becomes a link to its external IRI carrying only its types.
    fn emit_mock(
        &mut self,
        id: ResourceId,
        resource: &Resource,
        edge: &EdgeMapping,
    ) -> Result<RdfNode> {
        let key = mock::mock_key(resource).unwrap_or_default();
        let node = if key.contains("://") {
            RdfNode::uri(key)
        } else if let Some(namespace) = edge.bf_namespace.as_deref() {
            RdfNode::uri(format!("{namespace}{key}"))
        } else {
            self.omit(&id.to_string(), OmissionReason::UnlinkableMock)?;
            self.node_for(id)
        };
        self.remember(id, node.clone());
        self.emit_types(&node, edge);
        Ok(node)
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
}
