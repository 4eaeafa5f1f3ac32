//! Placeholders for unresolved external references.
//!
//! Some wire edges point at resources that live outside the document, such
//! as an authority record known only by its control number. When no
//! resolver can supply the record during conversion, the edge is kept and
//! its target becomes a *mock*: a resource labelled
//! `LCCN_RESOURCE_MOCK_<key>` whose id is derived from that label rather
//! than from content.
//!
//! Resolution is two-phase. [`gather_mock_keys`] collects every pending key
//! reachable from the roots so a resolver can look them all up at once; then
//! [`unmock`] substitutes the results and recomputes the id of every
//! ancestor whose content changed.
//!
//! ```
//! use bibld::fingerprint::Sha256Fingerprinter;
//! use bibld::mock::{gather_mock_keys, insert_mock};
//! use bibld::resource::{Resource, ResourceGraph};
//!
//! let fp = Sha256Fingerprinter;
//! let mut graph = ResourceGraph::new();
//! let agent = insert_mock(&mut graph, ["PERSON"], "n2021004098", &fp);
//! let mut work = Resource::new(["WORK"]);
//! work.add_outgoing("CREATOR", agent);
//! let work_id = graph.add(work, &fp);
//! graph.add_root(work_id);
//!
//! assert_eq!(gather_mock_keys(&graph), vec!["n2021004098".to_string()]);
//! ```

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::fingerprint::Fingerprinter;
use crate::label::LabelGenerator;
use crate::registry::UnitRegistry;
use crate::resource::{Link, Resource, ResourceGraph, ResourceId};

/// Label prefix that marks a mock resource.
pub const MOCK_PREFIX: &str = "LCCN_RESOURCE_MOCK_";

/// Creates a mock for an external key. The id is already assigned.
#[must_use]
pub fn create_mock<I, S>(types: I, key: &str, fingerprinter: &dyn Fingerprinter) -> Resource
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut resource = Resource::new(types);
    resource.label = format!("{MOCK_PREFIX}{key}");
    resource.id = Some(fingerprinter.fingerprint_key(&resource.label));
    resource
}

/// Creates a mock and stores it in `graph`.
pub fn insert_mock<I, S>(
    graph: &mut ResourceGraph,
    types: I,
    key: &str,
    fingerprinter: &dyn Fingerprinter,
) -> ResourceId
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mock = create_mock(types, key, fingerprinter);
    let id = fingerprinter.fingerprint_key(&mock.label);
    graph.insert_finalized(id, mock)
}

/// Returns true if the resource is a mock.
#[must_use]
pub fn is_mock(resource: &Resource) -> bool {
    resource.label.starts_with(MOCK_PREFIX)
}

/// Returns the external key a mock stands for.
#[must_use]
pub fn mock_key(resource: &Resource) -> Option<&str> {
    resource.label.strip_prefix(MOCK_PREFIX)
}

/// Derives the external key for an IRI: the part after `namespace` when the
/// IRI lives in it, the whole IRI otherwise.
#[must_use]
pub fn external_key(iri: &str, namespace: Option<&str>) -> String {
    namespace
        .and_then(|ns| iri.strip_prefix(ns))
        .filter(|key| !key.is_empty())
        .unwrap_or(iri)
        .to_string()
}

/// Collects the keys of every mock reachable from the roots, deduplicated,
/// in depth-first encounter order.
///
/// Reachability follows outgoing links and the sources of incoming links.
#[must_use]
pub fn gather_mock_keys(graph: &ResourceGraph) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut keys = IndexSet::new();
    for root in graph.roots() {
        gather(graph, root, &mut visited, &mut keys);
    }
    keys.into_iter().collect()
}

fn gather(
    graph: &ResourceGraph,
    id: ResourceId,
    visited: &mut HashSet<ResourceId>,
    keys: &mut IndexSet<String>,
) {
    if !visited.insert(id) {
        return;
    }
    let Some(resource) = graph.get(id) else {
        return;
    };
    if let Some(key) = mock_key(resource) {
        keys.insert(key.to_string());
        return;
    }
    for link in resource.outgoing.iter().chain(&resource.incoming) {
        gather(graph, link.node, visited, keys);
    }
}

/// Replaces mocks with resolved resources.
///
/// `resolved` maps external keys to fragments whose first root is the
/// resolved resource. Every resource on a path from a root to a replaced
/// mock is re-derived by its unit and gets a new id; everything else keeps
/// its id. Mocks without a resolution stay in place. Running the function
/// again with the same input is a no-op.
///
/// # Errors
///
/// Returns [`ConversionError::NoUnit`](crate::ConversionError::NoUnit) when
/// a resource that has to be re-derived matches no unit and `registry` has
/// no default.
pub fn unmock(
    graph: &ResourceGraph,
    resolved: &IndexMap<String, ResourceGraph>,
    registry: &UnitRegistry,
    fingerprinter: &dyn Fingerprinter,
    labels: &dyn LabelGenerator,
) -> Result<ResourceGraph> {
    let mut fold = Unmock {
        graph: graph.clone(),
        resolved,
        registry,
        fingerprinter,
        labels,
        memo: HashMap::new(),
        in_progress: HashSet::new(),
        replaced: HashMap::new(),
    };

    let mut new_roots = Vec::new();
    for root in graph.roots() {
        new_roots.push(fold.resolve(root, None)?.0);
    }

    let mut result = fold.graph;
    result.remap_incoming(&fold.replaced);
    result.set_roots(new_roots);
    result.retain_reachable();
    debug!(replaced = fold.replaced.len(), "unmocked resource graph");
    Ok(result)
}

struct Unmock<'r> {
    graph: ResourceGraph,
    resolved: &'r IndexMap<String, ResourceGraph>,
    registry: &'r UnitRegistry,
    fingerprinter: &'r dyn Fingerprinter,
    labels: &'r dyn LabelGenerator,
    memo: HashMap<ResourceId, (ResourceId, bool)>,
    in_progress: HashSet<ResourceId>,
    replaced: HashMap<ResourceId, ResourceId>,
}

impl Unmock<'_> {
    /// Returns the id that replaces `id` and whether anything changed.
    fn resolve(&mut self, id: ResourceId, via: Option<&str>) -> Result<(ResourceId, bool)> {
        if let Some(&done) = self.memo.get(&id) {
            return Ok(done);
        }
        if !self.in_progress.insert(id) {
            return Ok((id, false));
        }
        let result = match self.graph.get(id).cloned() {
            None => Ok((id, false)),
            Some(resource) if resource.is_mock() => {
                self.replace_mock(&resource, via).map(|replacement| {
                    replacement.map_or((id, false), |new_id| (new_id, new_id != id))
                })
            },
            Some(resource) => self.resolve_links(id, resource, via),
        };
        self.in_progress.remove(&id);
        let result = result?;
        if result.0 != id {
            self.replaced.insert(id, result.0);
        }
        self.memo.insert(id, result);
        Ok(result)
    }

    fn resolve_links(
        &mut self,
        id: ResourceId,
        resource: Resource,
        via: Option<&str>,
    ) -> Result<(ResourceId, bool)> {
        let mut changed = false;
        let mut outgoing = IndexSet::with_capacity(resource.outgoing.len());
        for link in &resource.outgoing {
            let (node, link_changed) = self.resolve(link.node, Some(&link.predicate))?;
            changed |= link_changed;
            outgoing.insert(Link::new(link.predicate.clone(), node));
        }
        for link in &resource.incoming {
            self.resolve(link.node, Some(&link.predicate))?;
        }
        if !changed {
            return Ok((id, false));
        }

        let mut updated = resource;
        updated.outgoing = outgoing;
        let rebuilt = self.rebuild(updated, via)?;
        let new_id = self.graph.add(rebuilt, self.fingerprinter);
        trace!(old = %id, new = %new_id, "recomputed resource id");
        Ok((new_id, new_id != id))
    }

    fn replace_mock(&mut self, mock: &Resource, via: Option<&str>) -> Result<Option<ResourceId>> {
        let Some(key) = mock_key(mock) else {
            return Ok(None);
        };
        let Some(fragment) = self.resolved.get(key) else {
            trace!(key, "mock left unresolved");
            return Ok(None);
        };
        if fragment.roots().next().is_none() {
            warn!(key, "resolved fragment has no root, mock kept");
            return Ok(None);
        }
        let Some(root) = self.graph.merge(fragment.clone()).into_iter().next() else {
            return Ok(None);
        };
        let (root, _) = self.resolve(root, via)?;
        let Some(resource) = self.graph.get(root).cloned() else {
            return Ok(None);
        };
        let rebuilt = self.rebuild(resource, via)?;
        let id = self.graph.add(rebuilt, self.fingerprinter);
        debug!(key, id = %id, "resolved mock");
        Ok(Some(id))
    }

    fn rebuild(&self, resource: Resource, via: Option<&str>) -> Result<Resource> {
        let unit = self.registry.resolve_ld(&resource.types, via)?;
        Ok(unit.rebuild(resource, &self.graph, self.labels))
    }
}
