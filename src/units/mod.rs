//! Mapper units.
//!
//! A [`MapperUnit`] owns the conversion of one kind of resource. Every hook
//! has a default that runs the generic profile-driven walk, so a unit only
//! overrides what is specific to its resource type: a label rule, a two-hop
//! wire shape, or an alternative wire encoding.
//!
//! Built-in units:
//!
//! - [`CoreUnit`] - the generic fallback
//! - [`TitleUnit`], [`TitledResourceUnit`] - title-derived labels
//! - [`AgentUnit`] - contributions, relator roles, authority links
//! - [`ComplexSubjectUnit`] - multi-component subject synthesis

use std::fmt;

use crate::bibframe::rdf::RdfNode;
use crate::bibframe::to_ld::LdMapper;
use crate::bibframe::to_rdf::RdfMapper;
use crate::error::Result;
use crate::label::LabelGenerator;
use crate::profile::EdgeMapping;
use crate::resource::{Link, Resource, ResourceGraph, ResourceId};
use crate::vocab::{predicates, properties, types};

mod agent;
mod complex_subject;
mod title;

pub use agent::AgentUnit;
pub use complex_subject::ComplexSubjectUnit;
pub use title::{TitleUnit, TitledResourceUnit};

/// Direction of an edge relative to the resource being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The current resource is the source.
    Outgoing,
    /// The current resource is the target.
    Incoming,
}

/// Wire→internal context for one declared edge of a resource.
#[derive(Debug, Clone, Copy)]
pub struct EdgeContext<'e> {
    /// Wire node of the resource being built.
    pub node: &'e RdfNode,
    /// The edge being mapped.
    pub edge: &'e EdgeMapping,
    /// All edges declared in the same direction, `edge` included.
    pub siblings: &'e [EdgeMapping],
    /// Edge direction.
    pub direction: Direction,
}

/// Internal→wire context for one link of a resource.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'e> {
    /// The resource that stores the link.
    pub parent: &'e Resource,
    /// Wire node already emitted for `parent`.
    pub parent_node: &'e RdfNode,
    /// The link being emitted.
    pub link: &'e Link,
    /// The edge mapping matched for the link.
    pub edge: &'e EdgeMapping,
    /// Link direction.
    pub direction: Direction,
}

/// Conversion behavior for one kind of resource.
pub trait MapperUnit: Send + Sync + fmt::Debug {
    /// Short name, used in logs.
    fn name(&self) -> &'static str;

    /// Collects the far ends of one declared edge of a resource under
    /// construction and links them into `draft`.
    ///
    /// # Errors
    ///
    /// Propagates fatal conversion errors.
    fn map_edge_to_ld(
        &self,
        mapper: &mut LdMapper<'_>,
        ctx: &EdgeContext<'_>,
        draft: &mut Resource,
    ) -> Result<()> {
        mapper.map_edge_default(ctx, draft)
    }

    /// Converts one wire node. `Ok(None)` means the node was skipped.
    ///
    /// # Errors
    ///
    /// Propagates fatal conversion errors.
    fn to_ld(
        &self,
        mapper: &mut LdMapper<'_>,
        node: &RdfNode,
        edge: &EdgeMapping,
    ) -> Result<Option<ResourceId>> {
        let Some(draft) = mapper.build(node, edge)? else {
            return Ok(None);
        };
        let label = self.label(&draft, mapper.graph(), mapper.converter().labels());
        Ok(Some(mapper.finalize(draft, label)))
    }

    /// Derives the display label of a resource whose edges are attached.
    fn label(
        &self,
        resource: &Resource,
        _graph: &ResourceGraph,
        labels: &dyn LabelGenerator,
    ) -> String {
        labels.label(resource)
    }

    /// Re-derives a resource after its links changed (un-mocking) or after
    /// it was fetched from a resolver. The returned resource has no id.
    fn rebuild(
        &self,
        mut resource: Resource,
        graph: &ResourceGraph,
        labels: &dyn LabelGenerator,
    ) -> Resource {
        resource.id = None;
        resource.label = self.label(&resource, graph, labels);
        resource
    }

    /// Emits one resource and returns its wire node.
    ///
    /// # Errors
    ///
    /// Propagates fatal conversion errors.
    fn to_rdf(
        &self,
        mapper: &mut RdfMapper<'_>,
        id: ResourceId,
        edge: &EdgeMapping,
    ) -> Result<RdfNode> {
        mapper.emit_resource(id, edge)
    }

    /// Emits one link of an already emitted resource.
    ///
    /// # Errors
    ///
    /// Propagates fatal conversion errors.
    fn emit_edge(&self, mapper: &mut RdfMapper<'_>, ctx: &EmitContext<'_>) -> Result<()> {
        mapper.emit_edge_default(ctx)
    }
}

/// Generic unit: the profile-driven walk with no type-specific behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreUnit;

impl MapperUnit for CoreUnit {
    fn name(&self) -> &'static str {
        "core"
    }
}

/// Returns the value of a resource's active LCCN, if any.
///
/// An LCCN is an `ID_LCCN` resource linked through `MAP` whose status is
/// absent or ends in `current`.
pub(crate) fn active_lccn(resource: &Resource, graph: &ResourceGraph) -> Option<String> {
    resource
        .targets(predicates::MAP)
        .filter_map(|id| graph.get(id))
        .filter(|identifier| identifier.has_type(types::ID_LCCN))
        .filter(|identifier| {
            identifier
                .first_property(properties::STATUS)
                .map_or(true, |status| status.ends_with("current"))
        })
        .find_map(|identifier| identifier.first_property(properties::NAME))
        .map(|value| value.split_whitespace().collect::<String>())
        .filter(|value| !value.is_empty())
}

/// Emits a link to the authority record of `target` instead of inlining it.
///
/// Returns `None` when the edge declares no namespace or the target carries
/// no active LCCN.
pub(crate) fn authority_node(
    mapper: &mut RdfMapper<'_>,
    target: &Resource,
    edge: &EdgeMapping,
) -> Option<RdfNode> {
    let namespace = edge.bf_namespace.as_deref()?;
    let lccn = active_lccn(target, mapper.source())?;
    let node = RdfNode::uri(format!("{namespace}{lccn}"));
    mapper.emit_types(&node, edge);
    Some(node)
}
