//! Configuration options for BIBFRAME conversion.
//!
//! This module provides the [`ConversionConfig`] struct which controls how
//! resource graphs are written to BIBFRAME, how strictly recoverable
//! conditions are treated, and how the resulting RDF is serialized.

use std::fmt;

/// Output format for RDF serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RdfFormat {
    /// RDF/XML format (application/rdf+xml) - Most compatible with legacy systems
    RdfXml,
    /// JSON-LD format (application/ld+json) - Modern, readable, web-friendly
    #[default]
    JsonLd,
    /// Turtle format (text/turtle) - Compact, human-friendly
    Turtle,
    /// N-Triples format (application/n-triples) - Simple, line-based
    NTriples,
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RdfXml => write!(f, "RDF/XML"),
            Self::JsonLd => write!(f, "JSON-LD"),
            Self::Turtle => write!(f, "Turtle"),
            Self::NTriples => write!(f, "N-Triples"),
        }
    }
}

impl RdfFormat {
    /// Returns the MIME type for this RDF format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::RdfXml => "application/rdf+xml",
            Self::JsonLd => "application/ld+json",
            Self::Turtle => "text/turtle",
            Self::NTriples => "application/n-triples",
        }
    }

    /// Returns the typical file extension for this RDF format.
    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::RdfXml => "rdf",
            Self::JsonLd => "jsonld",
            Self::Turtle => "ttl",
            Self::NTriples => "nt",
        }
    }
}

/// Configuration for BIBFRAME conversion.
///
/// Controls wire node naming, authority linking, and error strictness.
///
/// # Examples
///
/// ```
/// use bibld::bibframe::{ConversionConfig, RdfFormat};
///
/// // Default configuration (blank nodes, JSON-LD output)
/// let config = ConversionConfig::default();
///
/// // Minted URIs and Turtle output
/// let config = ConversionConfig::new()
///     .with_base_uri("http://example.org/")
///     .with_output_format(RdfFormat::Turtle);
/// assert_eq!(config.base_uri.as_deref(), Some("http://example.org/"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversionConfig {
    // === URI Generation ===
    /// Base URI for emitted wire nodes.
    ///
    /// When `Some`, resources are written as `{base}resource/{id}`.
    /// When `None` (default), blank nodes named after the resource id are used.
    pub base_uri: Option<String>,

    /// Link agents to external authority URIs when identifiable.
    ///
    /// When true, agents carrying a current LCCN identifier are written as a
    /// link to the authority IRI instead of being inlined. Complex-subject
    /// components always prefer the authority link.
    pub link_authorities: bool,

    // === Output Control ===
    /// Output format for RDF serialization.
    pub output_format: RdfFormat,

    // === Error Handling ===
    /// Strict mode.
    ///
    /// When true, any omission that would otherwise be logged and recorded in
    /// the conversion report (no unit for a resource, rejected complex
    /// subject, cyclic wire data) fails the conversion instead.
    pub strict: bool,
}

impl ConversionConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URI for emitted wire nodes.
    #[must_use]
    pub fn with_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_output_format(mut self, format: RdfFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enables linking to external authority URIs.
    #[must_use]
    pub const fn with_authority_linking(mut self, enabled: bool) -> Self {
        self.link_authorities = enabled;
        self
    }

    /// Enables strict mode.
    #[must_use]
    pub const fn with_strict_mode(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }
}
