//! Internal resource graph model.
//!
//! Resources are content-addressed: a resource's [`ResourceId`] is the
//! fingerprint of its types, property document, and outgoing links, and it is
//! assigned only once that content is final. Resources live in a
//! [`ResourceGraph`] arena keyed by id; links between them are stored as
//! `(predicate, id)` pairs on each side, so a resource referenced from two
//! places is a single arena entry with two edges.
//!
//! # Examples
//!
//! ```
//! use bibld::fingerprint::Sha256Fingerprinter;
//! use bibld::resource::{Resource, ResourceGraph};
//!
//! let fp = Sha256Fingerprinter;
//! let mut graph = ResourceGraph::new();
//!
//! let mut title = Resource::new(["TITLE"]);
//! title.add_property("MAIN_TITLE", "Gogol, Vij");
//! let title_id = graph.add(title, &fp);
//!
//! let mut instance = Resource::new(["INSTANCE"]);
//! instance.add_outgoing("TITLE", title_id);
//! let instance_id = graph.add(instance, &fp);
//! graph.add_root(instance_id);
//!
//! assert_eq!(graph.len(), 2);
//! assert_ne!(title_id, instance_id);
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprinter;
use crate::mock;

/// Content fingerprint identifying a finalized resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl ResourceId {
    /// Returns the raw 64-bit value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Property document: property tag → ordered values.
///
/// An absent key and a key with an empty list are different things; the
/// mappers never create empty lists.
pub type PropertyDoc = IndexMap<String, Vec<String>>;

/// One end of an edge as seen from the resource that stores it.
///
/// On an outgoing link `node` is the target; on an incoming link it is the
/// source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Link {
    /// Edge predicate tag.
    pub predicate: String,
    /// The resource on the other end of the edge.
    pub node: ResourceId,
}

impl Link {
    /// Creates a new link.
    #[must_use]
    pub fn new(predicate: impl Into<String>, node: ResourceId) -> Self {
        Self {
            predicate: predicate.into(),
            node,
        }
    }
}

/// A directed edge between two finalized resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source resource.
    pub source: ResourceId,
    /// Target resource.
    pub target: ResourceId,
    /// Edge predicate tag.
    pub predicate: String,
}

/// An internal resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resource {
    /// Content fingerprint; `None` while the resource is under construction.
    pub id: Option<ResourceId>,
    /// Type tags.
    pub types: BTreeSet<String>,
    /// Derived display string.
    pub label: String,
    /// Property document.
    pub doc: PropertyDoc,
    /// Outgoing links (this resource is the source).
    pub outgoing: IndexSet<Link>,
    /// Incoming links (this resource is the target).
    pub incoming: IndexSet<Link>,
    /// Set when the resource was derived from unresolved mock content and
    /// must be re-derived once those mocks are resolved.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_mock: bool,
}

impl Resource {
    /// Creates an unfinalized resource with the given types.
    #[must_use]
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Returns the id, if the resource has been finalized.
    #[must_use]
    pub const fn id(&self) -> Option<ResourceId> {
        self.id
    }

    /// Returns true if the resource carries the given type tag.
    #[must_use]
    pub fn has_type(&self, type_tag: &str) -> bool {
        self.types.contains(type_tag)
    }

    /// Appends a value under a property, keeping encounter order.
    pub fn add_property(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.id = None;
        self.doc
            .entry(property.into())
            .or_default()
            .push(value.into());
    }

    /// Returns the values stored under a property.
    #[must_use]
    pub fn property(&self, property: &str) -> Option<&[String]> {
        self.doc.get(property).map(Vec::as_slice)
    }

    /// Returns the first value stored under a property.
    #[must_use]
    pub fn first_property(&self, property: &str) -> Option<&str> {
        self.property(property)
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    /// Adds an outgoing link. Invalidates the id.
    pub fn add_outgoing(&mut self, predicate: impl Into<String>, target: ResourceId) {
        self.id = None;
        self.outgoing.insert(Link::new(predicate, target));
    }

    /// Adds an incoming link. The id is unaffected since incoming links are
    /// not part of the fingerprint.
    pub fn add_incoming(&mut self, predicate: impl Into<String>, source: ResourceId) {
        self.incoming.insert(Link::new(predicate, source));
    }

    /// Returns the targets of outgoing links with the given predicate.
    pub fn targets<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = ResourceId> + 'a {
        self.outgoing
            .iter()
            .filter(move |link| link.predicate == predicate)
            .map(|link| link.node)
    }

    /// Returns true if this resource is a mock placeholder.
    #[must_use]
    pub fn is_mock(&self) -> bool {
        mock::is_mock(self)
    }
}

/// Arena of finalized resources plus the ordered set of conversion roots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceGraph {
    resources: IndexMap<ResourceId, Resource>,
    roots: IndexSet<ResourceId>,
}

impl ResourceGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalizes a resource and stores it.
    ///
    /// Computes the fingerprint, assigns it, and inserts the resource. If a
    /// structurally equal resource is already present, the incoming links of
    /// both are merged and the existing entry is kept; an existing entry with
    /// no label takes the new one.
    pub fn add(&mut self, mut resource: Resource, fingerprinter: &dyn Fingerprinter) -> ResourceId {
        let id = fingerprinter.fingerprint(&resource);
        resource.id = Some(id);
        self.insert_finalized(id, resource)
    }

    /// Stores a resource whose id has already been assigned (e.g. a mock).
    pub(crate) fn insert_finalized(&mut self, id: ResourceId, resource: Resource) -> ResourceId {
        match self.resources.get_mut(&id) {
            Some(existing) => {
                if existing.label.is_empty() {
                    existing.label = resource.label;
                }
                existing.incoming.extend(resource.incoming);
                existing.has_mock |= resource.has_mock;
            },
            None => {
                self.resources.insert(id, resource);
            },
        }
        id
    }

    /// Marks a resource as a conversion root.
    pub fn add_root(&mut self, id: ResourceId) {
        self.roots.insert(id);
    }

    /// Returns the root ids in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.roots.iter().copied()
    }

    /// Returns the root resources in insertion order.
    pub fn root_resources(&self) -> impl Iterator<Item = &Resource> {
        self.roots.iter().filter_map(|id| self.resources.get(id))
    }

    /// Looks up a resource by id.
    #[must_use]
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.resources.get_mut(&id)
    }

    /// Returns true if the graph holds a resource with this id.
    #[must_use]
    pub fn contains(&self, id: ResourceId) -> bool {
        self.resources.contains_key(&id)
    }

    /// Returns the number of stored resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if no resources are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns an iterator over all stored resources.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Returns every edge in the graph, deduplicated.
    #[must_use]
    pub fn edges(&self) -> IndexSet<Edge> {
        let mut edges = IndexSet::new();
        for (&id, resource) in &self.resources {
            for link in &resource.outgoing {
                edges.insert(Edge {
                    source: id,
                    target: link.node,
                    predicate: link.predicate.clone(),
                });
            }
            for link in &resource.incoming {
                edges.insert(Edge {
                    source: link.node,
                    target: id,
                    predicate: link.predicate.clone(),
                });
            }
        }
        edges
    }

    /// Merges another graph into this one and returns the other graph's roots.
    pub fn merge(&mut self, other: ResourceGraph) -> Vec<ResourceId> {
        let roots = other.roots.into_iter().collect();
        for (id, resource) in other.resources {
            self.insert_finalized(id, resource);
        }
        roots
    }

    /// Replaces the root set.
    pub(crate) fn set_roots(&mut self, roots: impl IntoIterator<Item = ResourceId>) {
        self.roots = roots.into_iter().collect();
    }

    /// Re-points incoming links whose source was replaced.
    pub(crate) fn remap_incoming(&mut self, replaced: &HashMap<ResourceId, ResourceId>) {
        if replaced.is_empty() {
            return;
        }
        for resource in self.resources.values_mut() {
            if resource.incoming.iter().any(|link| replaced.contains_key(&link.node)) {
                resource.incoming = resource
                    .incoming
                    .iter()
                    .map(|link| {
                        let node = replaced.get(&link.node).copied().unwrap_or(link.node);
                        Link::new(link.predicate.clone(), node)
                    })
                    .collect();
            }
        }
    }

    /// Drops every resource not reachable from a root.
    ///
    /// Reachability follows outgoing links and the sources of incoming links.
    pub fn retain_reachable(&mut self) {
        let mut reachable = HashSet::new();
        let mut stack: Vec<ResourceId> = self.roots.iter().copied().collect();
        while let Some(id) = stack.pop() {
            if !reachable.insert(id) {
                continue;
            }
            if let Some(resource) = self.resources.get(&id) {
                stack.extend(resource.outgoing.iter().map(|link| link.node));
                stack.extend(resource.incoming.iter().map(|link| link.node));
            }
        }
        self.resources.retain(|id, _| reachable.contains(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::Sha256Fingerprinter;

    #[test]
    fn test_property_order_is_preserved() {
        let mut resource = Resource::new(["TITLE"]);
        resource.add_property("MAIN_TITLE", "first");
        resource.add_property("MAIN_TITLE", "second");
        assert_eq!(
            resource.property("MAIN_TITLE"),
            Some(&["first".to_string(), "second".to_string()][..])
        );
        assert_eq!(resource.first_property("MAIN_TITLE"), Some("first"));
        assert!(resource.property("SUBTITLE").is_none());
    }

    #[test]
    fn test_equal_content_collapses_to_one_entry() {
        let fp = Sha256Fingerprinter;
        let mut graph = ResourceGraph::new();

        let mut a = Resource::new(["PERSON"]);
        a.add_property("NAME", "Gogol, Nikolai");
        let mut b = Resource::new(["PERSON"]);
        b.add_property("NAME", "Gogol, Nikolai");

        let id_a = graph.add(a, &fp);
        let id_b = graph.add(b, &fp);
        assert_eq!(id_a, id_b);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_mutation_invalidates_id() {
        let fp = Sha256Fingerprinter;
        let mut graph = ResourceGraph::new();
        let id = graph.add(Resource::new(["TITLE"]), &fp);

        let mut copy = graph.get(id).cloned().expect("resource present");
        assert!(copy.id().is_some());
        copy.add_property("MAIN_TITLE", "changed");
        assert!(copy.id().is_none());
    }

    #[test]
    fn test_incoming_links_merge_on_duplicate_insert() {
        let fp = Sha256Fingerprinter;
        let mut graph = ResourceGraph::new();

        let mut first = Resource::new(["INSTANCE"]);
        first.add_incoming("INSTANTIATES", ResourceId(1));
        let mut second = Resource::new(["INSTANCE"]);
        second.add_incoming("INSTANTIATES", ResourceId(2));

        let id = graph.add(first, &fp);
        assert_eq!(graph.add(second, &fp), id);
        assert_eq!(graph.get(id).map(|r| r.incoming.len()), Some(2));
    }

    #[test]
    fn test_edges_and_reachability() {
        let fp = Sha256Fingerprinter;
        let mut graph = ResourceGraph::new();

        let leaf = graph.add(Resource::new(["TITLE"]), &fp);
        let orphan = graph.add(Resource::new(["ORPHAN"]), &fp);
        let mut root = Resource::new(["INSTANCE"]);
        root.add_outgoing("TITLE", leaf);
        let root_id = graph.add(root, &fp);
        graph.add_root(root_id);

        let edges = graph.edges();
        assert_eq!(edges.len(), 1);
        assert!(edges.contains(&Edge {
            source: root_id,
            target: leaf,
            predicate: "TITLE".into(),
        }));

        graph.retain_reachable();
        assert!(graph.contains(leaf));
        assert!(!graph.contains(orphan));
    }

    #[test]
    fn test_resource_id_display() {
        assert_eq!(ResourceId(255).to_string(), "00000000000000ff");
    }
}
