//! Error types for conversion operations.
//!
//! This module provides the [`ConversionError`] type for all conversion
//! operations and the [`Result`] convenience type.

use std::collections::BTreeSet;

use thiserror::Error;

/// Error type for all conversion operations.
///
/// Configuration and unsupported-data errors abort the conversion. Partial
/// data and unresolved references are recovered locally and never surface
/// here unless strict mode is enabled.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The engine was wired incorrectly (e.g. no default mapper unit).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No mapper unit is registered for an observed key and no default exists.
    #[error("No mapper unit registered for types {types:?} and predicate {predicate:?}")]
    NoUnit {
        /// The type set that was looked up.
        types: BTreeSet<String>,
        /// The predicate that was looked up, if any.
        predicate: Option<String>,
    },

    /// The mapping profile is malformed or incomplete.
    #[error("Invalid mapping profile: {0}")]
    InvalidProfile(String),

    /// The wire data carries a type the active profile declares unsupported.
    #[error("Unsupported data: node {node} has unsupported type {rdf_type}")]
    UnsupportedData {
        /// The offending wire node.
        node: String,
        /// The disallowed type IRI.
        rdf_type: String,
    },

    /// Structurally broken wire data (e.g. a cyclic RDF list).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Error while parsing or serializing RDF.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A resource graph link points at an id the graph does not hold.
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(String),

    /// A recoverable omission that strict mode turns into a failure.
    #[error("Omitted in strict mode: {0}")]
    StrictOmission(String),

    /// JSON error while reading a mapping profile.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`ConversionError`].
pub type Result<T> = std::result::Result<T, ConversionError>;
