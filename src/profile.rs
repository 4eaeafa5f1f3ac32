//! Declarative mapping profiles.
//!
//! A [`MappingProfile`] says, for every supported resource type, which wire
//! predicates carry which internal properties and which edges lead to which
//! nested resources. Profiles are plain JSON documents; wire terms may be
//! written as CURIEs (`bf:mainTitle`) using the profile's `namespaces` table
//! or the standard prefixes, and are expanded to full IRIs on load.
//!
//! ```
//! use bibld::profile::MappingProfile;
//!
//! let profile = MappingProfile::from_json(r#"{
//!     "name": "minimal",
//!     "roots": [{
//!         "ldResourceDef": { "typeSet": ["INSTANCE"] },
//!         "bfResourceDef": { "typeSet": ["bf:Instance"] },
//!         "resourceMapping": {
//!             "properties": [
//!                 { "ldProperty": "DIMENSIONS", "bfProperty": "bf:dimensions" }
//!             ]
//!         }
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(
//!     profile.roots[0].resource_mapping.properties[0].bf_property,
//!     "http://id.loc.gov/ontologies/bibframe/dimensions"
//! );
//! ```

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bibframe::namespaces;
use crate::error::{ConversionError, Result};

const BUNDLED_BIBFRAME_PROFILE: &str = include_str!("../profiles/bibframe.json");

/// Internal-side pattern: a type set and an optional edge predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdResourceDef {
    /// Internal type tags.
    pub type_set: BTreeSet<String>,
    /// Internal edge predicate, if this definition describes an edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
}

impl LdResourceDef {
    /// Creates a definition.
    #[must_use]
    pub fn new<I, S>(types: I, predicate: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_set: types.into_iter().map(Into::into).collect(),
            predicate: predicate.map(String::from),
        }
    }
}

/// Wire-side pattern: a type set, an optional predicate, and the types that
/// make a node unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BfResourceDef {
    /// Wire type IRIs; a node must carry all of them.
    pub type_set: BTreeSet<String>,
    /// Wire predicate IRI, if this definition describes an edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    /// Extra wire types that make a matching node unsupported.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub unsupported_types: BTreeSet<String>,
}

impl BfResourceDef {
    /// Creates a definition without unsupported types.
    #[must_use]
    pub fn new<I, S>(types: I, predicate: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_set: types.into_iter().map(Into::into).collect(),
            predicate: predicate.map(String::from),
            unsupported_types: BTreeSet::new(),
        }
    }
}

/// How a property value is written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Plain literal.
    #[default]
    Literal,
    /// IRI reference.
    Iri,
}

/// One wire predicate ⇄ one internal property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMapping {
    /// Internal property tag.
    pub ld_property: String,
    /// Wire predicate IRI.
    pub bf_property: String,
    /// Wire object kind.
    #[serde(default)]
    pub object: ObjectKind,
}

/// One category of outgoing or incoming edge and the rules for the resource
/// on its far end. Also used for profile roots, which have no predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeMapping {
    /// Internal side of the edge.
    pub ld_resource_def: LdResourceDef,
    /// Wire side of the edge.
    pub bf_resource_def: BfResourceDef,
    /// The far end may live outside the current document.
    #[serde(default)]
    pub fetch_remote: bool,
    /// Namespace of external identifiers for the far end (e.g. the LC names
    /// authority), used to derive resolver keys and authority links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bf_namespace: Option<String>,
    /// Rules for the far-end resource.
    #[serde(default)]
    pub resource_mapping: ResourceMapping,
}

impl EdgeMapping {
    /// Returns the internal edge predicate.
    #[must_use]
    pub fn ld_predicate(&self) -> Option<&str> {
        self.ld_resource_def.predicate.as_deref()
    }

    /// Returns the wire edge predicate.
    #[must_use]
    pub fn bf_predicate(&self) -> Option<&str> {
        self.bf_resource_def.predicate.as_deref()
    }
}

/// The full rule set for one resource type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMapping {
    /// Property correspondences.
    #[serde(default)]
    pub properties: Vec<PropertyMapping>,
    /// Edges where this resource is the source.
    #[serde(default)]
    pub outgoing_edges: Vec<EdgeMapping>,
    /// Edges where this resource is the target.
    #[serde(default)]
    pub incoming_edges: Vec<EdgeMapping>,
}

/// A complete mapping profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingProfile {
    /// Profile name, used in log output.
    pub name: String,
    /// Extra CURIE prefixes.
    #[serde(default)]
    pub namespaces: IndexMap<String, String>,
    /// Top-level resource mappings.
    pub roots: Vec<EdgeMapping>,
}

impl MappingProfile {
    /// Parses, expands, and validates a profile from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::Json`] for unparsable input and
    /// [`ConversionError::InvalidProfile`] for incomplete profiles.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.prepare()
    }

    /// Reads a profile from any reader.
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let profile: Self = serde_json::from_reader(reader)?;
        profile.prepare()
    }

    /// Reads a profile from a file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be opened; see also
    /// [`from_json`](Self::from_json).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Returns the bundled BIBFRAME profile.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled document is broken.
    pub fn bibframe() -> Result<Self> {
        Self::from_json(BUNDLED_BIBFRAME_PROFILE)
    }

    /// Returns the root mapping whose internal type set is the largest subset
    /// of `types`, first declared winning ties.
    #[must_use]
    pub fn root_for_types(&self, types: &BTreeSet<String>) -> Option<&EdgeMapping> {
        best_match(self.roots.iter(), |root| &root.ld_resource_def.type_set, types)
    }

    fn prepare(mut self) -> Result<Self> {
        let prefixes = self.prefix_table();
        for root in &mut self.roots {
            expand_edge(root, &prefixes);
        }
        self.validate()?;
        Ok(self)
    }

    fn prefix_table(&self) -> IndexMap<String, String> {
        let mut table: IndexMap<String, String> = namespaces::standard_prefixes()
            .iter()
            .map(|(prefix, iri)| ((*prefix).to_string(), (*iri).to_string()))
            .collect();
        table.extend(self.namespaces.clone());
        table
    }

    /// Checks that the profile is complete.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::InvalidProfile`] naming the offending path.
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            return Err(invalid(&self.name, "profile declares no roots"));
        }
        for (i, root) in self.roots.iter().enumerate() {
            let path = format!("roots[{i}]");
            if root.bf_resource_def.type_set.is_empty() {
                return Err(invalid(&path, "bfResourceDef.typeSet is empty"));
            }
            validate_edge(root, &path, true)?;
        }
        Ok(())
    }
}

/// Picks the candidate whose type set is the largest subset of `types`.
pub(crate) fn best_match<'m, T, I, F>(
    candidates: I,
    type_set: F,
    types: &BTreeSet<String>,
) -> Option<&'m T>
where
    I: IntoIterator<Item = &'m T>,
    F: Fn(&'m T) -> &'m BTreeSet<String>,
{
    let mut best: Option<(&'m T, usize)> = None;
    for candidate in candidates {
        let set = type_set(candidate);
        if !set.is_subset(types) {
            continue;
        }
        if best.map_or(true, |(_, size)| set.len() > size) {
            best = Some((candidate, set.len()));
        }
    }
    best.map(|(candidate, _)| candidate)
}

fn validate_edge(edge: &EdgeMapping, path: &str, is_root: bool) -> Result<()> {
    if edge.ld_resource_def.type_set.is_empty() {
        return Err(invalid(path, "ldResourceDef.typeSet is empty"));
    }
    if !is_root && edge.ld_predicate().map_or(true, str::is_empty) {
        return Err(invalid(path, "ldResourceDef.predicate is required on edges"));
    }
    if edge.bf_predicate().is_some_and(str::is_empty) {
        return Err(invalid(path, "bfResourceDef.predicate is empty"));
    }
    let mapping = &edge.resource_mapping;
    for (i, property) in mapping.properties.iter().enumerate() {
        if property.ld_property.is_empty() || property.bf_property.is_empty() {
            return Err(invalid(
                &format!("{path}.properties[{i}]"),
                "ldProperty and bfProperty must be non-empty",
            ));
        }
    }
    for (i, nested) in mapping.outgoing_edges.iter().enumerate() {
        validate_edge(nested, &format!("{path}.outgoingEdges[{i}]"), false)?;
    }
    for (i, nested) in mapping.incoming_edges.iter().enumerate() {
        validate_edge(nested, &format!("{path}.incomingEdges[{i}]"), false)?;
    }
    Ok(())
}

fn invalid(path: &str, message: &str) -> ConversionError {
    ConversionError::InvalidProfile(format!("{path}: {message}"))
}

fn expand_edge(edge: &mut EdgeMapping, prefixes: &IndexMap<String, String>) {
    let bf = &mut edge.bf_resource_def;
    bf.type_set = bf.type_set.iter().map(|t| expand(t, prefixes)).collect();
    bf.unsupported_types = bf
        .unsupported_types
        .iter()
        .map(|t| expand(t, prefixes))
        .collect();
    if let Some(predicate) = bf.predicate.as_mut() {
        *predicate = expand(predicate, prefixes);
    }
    if let Some(namespace) = edge.bf_namespace.as_mut() {
        *namespace = expand(namespace, prefixes);
    }
    let mapping = &mut edge.resource_mapping;
    for property in &mut mapping.properties {
        property.bf_property = expand(&property.bf_property, prefixes);
    }
    for nested in mapping
        .outgoing_edges
        .iter_mut()
        .chain(mapping.incoming_edges.iter_mut())
    {
        expand_edge(nested, prefixes);
    }
}

/// Expands a CURIE against the prefix table; full IRIs and unknown prefixes
/// are returned unchanged.
fn expand(term: &str, prefixes: &IndexMap<String, String>) -> String {
    match term.split_once(':') {
        Some((prefix, local)) if !local.starts_with("//") => prefixes
            .get(prefix)
            .map_or_else(|| term.to_string(), |iri| format!("{iri}{local}")),
        _ => term.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{predicates, types};

    #[test]
    fn test_expand_curies() {
        let prefixes: IndexMap<String, String> =
            [("bf".to_string(), namespaces::BF.to_string())].into_iter().collect();
        assert_eq!(
            expand("bf:Instance", &prefixes),
            "http://id.loc.gov/ontologies/bibframe/Instance"
        );
        assert_eq!(expand("http://example.org/x", &prefixes), "http://example.org/x");
        assert_eq!(expand("unknown:x", &prefixes), "unknown:x");
        assert_eq!(expand("urn:isbn:123", &prefixes), "urn:isbn:123");
    }

    #[test]
    fn test_custom_namespace_prefix() {
        let profile = MappingProfile::from_json(
            r#"{
                "name": "custom",
                "namespaces": { "ex": "http://example.org/ns/" },
                "roots": [{
                    "ldResourceDef": { "typeSet": ["THING"] },
                    "bfResourceDef": { "typeSet": ["ex:Thing"] }
                }]
            }"#,
        )
        .expect("valid profile");
        assert!(profile.roots[0]
            .bf_resource_def
            .type_set
            .contains("http://example.org/ns/Thing"));
    }

    #[test]
    fn test_bundled_profile_loads() {
        let profile = MappingProfile::bibframe().expect("bundled profile is valid");
        assert!(!profile.roots.is_empty());
        let instance: BTreeSet<String> = [types::INSTANCE.to_string()].into();
        let root = profile.root_for_types(&instance).expect("instance root");
        assert!(root
            .resource_mapping
            .incoming_edges
            .iter()
            .any(|e| e.ld_predicate() == Some(predicates::INSTANTIATES)));
    }

    #[test]
    fn test_profile_without_roots_is_rejected() {
        let err = MappingProfile::from_json(r#"{ "name": "empty", "roots": [] }"#).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidProfile(_)));
    }

    #[test]
    fn test_edge_without_predicate_is_rejected() {
        let err = MappingProfile::from_json(
            r#"{
                "name": "broken",
                "roots": [{
                    "ldResourceDef": { "typeSet": ["INSTANCE"] },
                    "bfResourceDef": { "typeSet": ["bf:Instance"] },
                    "resourceMapping": {
                        "outgoingEdges": [{
                            "ldResourceDef": { "typeSet": ["TITLE"] },
                            "bfResourceDef": { "typeSet": ["bf:Title"], "predicate": "bf:title" }
                        }]
                    }
                }]
            }"#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("roots[0].outgoingEdges[0]"), "{message}");
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        let err = MappingProfile::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConversionError::Json(_)));
    }

    #[test]
    fn test_best_match_prefers_larger_subset_then_first() {
        let a: BTreeSet<String> = ["A".to_string()].into();
        let ab: BTreeSet<String> = ["A".to_string(), "B".to_string()].into();
        let a_again: BTreeSet<String> = ["A".to_string()].into();
        let candidates = [a.clone(), ab.clone(), a_again];

        let node: BTreeSet<String> = ["A".to_string(), "B".to_string(), "C".to_string()].into();
        assert_eq!(best_match(candidates.iter(), |c| c, &node), Some(&ab));

        let only_a: BTreeSet<String> = ["A".to_string()].into();
        let chosen = best_match(candidates.iter(), |c| c, &only_a).expect("match");
        assert!(std::ptr::eq(chosen, &candidates[0]));
    }
}
