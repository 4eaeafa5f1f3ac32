//! External resource resolution.
//!
//! A resolver turns an external key (typically an LCCN) into a resource
//! fragment. It is consulted on demand while mapping `fetchRemote` edges and
//! in batch while un-mocking.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::resource::ResourceGraph;

/// Resolves external keys into resources.
///
/// A resolved value is a [`ResourceGraph`] fragment whose first root is the
/// resolved resource; any other entries are its sub-resources.
pub trait ResourceResolver: Send + Sync + fmt::Debug {
    /// Resolves a single key.
    fn resolve(&self, key: &str) -> Option<ResourceGraph>;

    /// Resolves several keys at once.
    ///
    /// The default implementation calls [`resolve`](Self::resolve) per key;
    /// resolvers backed by a remote service should override it with a single
    /// round trip.
    fn resolve_batch(&self, keys: &[String]) -> IndexMap<String, ResourceGraph> {
        keys.iter()
            .filter_map(|key| self.resolve(key).map(|graph| (key.clone(), graph)))
            .collect()
    }
}

/// In-memory resolver backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    entries: HashMap<String, ResourceGraph>,
}

impl MapResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fragment for a key.
    pub fn insert(&mut self, key: impl Into<String>, fragment: ResourceGraph) {
        self.entries.insert(key.into(), fragment);
    }

    /// Builder-style variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, fragment: ResourceGraph) -> Self {
        self.insert(key, fragment);
        self
    }

    /// Returns the number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceResolver for MapResolver {
    fn resolve(&self, key: &str) -> Option<ResourceGraph> {
        self.entries.get(key).cloned()
    }
}
