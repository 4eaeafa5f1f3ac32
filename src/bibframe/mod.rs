//! BIBFRAME wire format.
//!
//! This module holds the wire side of the conversion: the RDF graph model,
//! namespace constants, output configuration, and the two walkers that move
//! data between BIBFRAME and the resource graph.
//!
//! # What is BIBFRAME?
//!
//! BIBFRAME (Bibliographic Framework) is the Library of Congress's linked
//! data model for bibliographic description. A catalog record becomes a
//! small graph of entities:
//!
//! - **Work**: the intellectual content (contributors, subjects, language)
//! - **Instance**: a material embodiment (titles, identifiers, publication)
//!
//! # Quick Start
//!
//! ```
//! use bibld::bibframe::{bibframe_to_ld, ld_to_bibframe, RdfFormat, RdfGraph};
//! use bibld::MappingProfile;
//!
//! let profile = MappingProfile::bibframe()?;
//! let wire = RdfGraph::parse(
//!     r#"_:i <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://id.loc.gov/ontologies/bibframe/Instance> .
//! _:i <http://id.loc.gov/ontologies/bibframe/dimensions> "24 cm" ."#,
//!     RdfFormat::NTriples,
//! )?;
//!
//! let resources = bibframe_to_ld(&wire, &profile)?;
//! assert_eq!(resources.roots().count(), 1);
//!
//! let back = ld_to_bibframe(&resources, &profile)?;
//! assert!(back.triples().any(|t| t.object.value() == "24 cm"));
//! # Ok::<(), bibld::ConversionError>(())
//! ```
//!
//! # Modules
//!
//! - `config`: output and strictness options
//! - [`namespaces`]: namespace prefixes and wire terms
//! - [`rdf`]: RDF graph representation, parsing, and serialization
//! - [`to_ld`]: wire to resource graph
//! - [`to_rdf`]: resource graph to wire

mod config;
pub mod namespaces;
pub mod rdf;
pub mod to_ld;
pub mod to_rdf;

pub use config::{ConversionConfig, RdfFormat};
pub use namespaces::{BF, BFLC, LC_NAMES, LC_SUBJECTS, MADSRDF, RDF, RDFS, RELATORS, XSD};
pub use rdf::{GraphIndex, RdfGraph, RdfNode, RdfTriple};

use crate::converter::Converter;
use crate::error::Result;
use crate::profile::MappingProfile;
use crate::registry::UnitRegistry;
use crate::resource::ResourceGraph;

/// Converts a BIBFRAME graph to a resource graph with the standard units.
///
/// For repeated conversions build a [`Converter`] once instead.
///
/// # Errors
///
/// Returns an error for invalid profiles, unsupported data, and malformed
/// wire structures.
pub fn bibframe_to_ld(graph: &RdfGraph, profile: &MappingProfile) -> Result<ResourceGraph> {
    Converter::new(profile.clone(), UnitRegistry::standard())?.to_ld(graph)
}

/// Converts a resource graph to a BIBFRAME graph with the standard units.
///
/// # Errors
///
/// Returns an error for invalid profiles and unit failures.
pub fn ld_to_bibframe(graph: &ResourceGraph, profile: &MappingProfile) -> Result<RdfGraph> {
    Converter::new(profile.clone(), UnitRegistry::standard())?.to_rdf(graph)
}
