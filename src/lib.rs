#![warn(missing_docs)]

//! # bibld: BIBFRAME ↔ linked-data resource graphs
//!
//! A profile-driven conversion engine between BIBFRAME 2.0 RDF graphs and a
//! typed, content-addressed resource graph.
//!
//! ## Quick Start
//!
//! ```
//! use bibld::bibframe::{RdfFormat, RdfGraph};
//! use bibld::vocab::types;
//! use bibld::Converter;
//!
//! let wire = RdfGraph::parse(
//!     r#"_:i <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://id.loc.gov/ontologies/bibframe/Instance> .
//! _:i <http://id.loc.gov/ontologies/bibframe/title> _:t .
//! _:t <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://id.loc.gov/ontologies/bibframe/Title> .
//! _:t <http://id.loc.gov/ontologies/bibframe/mainTitle> "Vij" ."#,
//!     RdfFormat::NTriples,
//! )?;
//!
//! let converter = Converter::standard()?;
//! let resources = converter.to_ld(&wire)?;
//! let instance = resources.root_resources().next().expect("one instance");
//! assert!(instance.has_type(types::INSTANCE));
//! assert_eq!(instance.label, "Vij");
//!
//! let back = converter.to_rdf(&resources)?;
//! assert!(!back.is_empty());
//! # Ok::<(), bibld::ConversionError>(())
//! ```
//!
//! ## How it works
//!
//! A [`MappingProfile`] declares, per resource type, which wire predicates
//! carry which internal properties and which edges lead to nested
//! resources. A [`UnitRegistry`] assigns each kind of resource a
//! [`MapperUnit`](units::MapperUnit) that converts it, with a generic default
//! for everything the profile describes declaratively. Every finished
//! resource is identified by a content fingerprint, so structurally equal
//! resources collapse into one.
//!
//! References to authority records that are not described in the input
//! become mock resources; [`Converter::unmock`] later swaps them for the
//! resolved records and re-derives everything that depended on them.
//!
//! ## Modules
//!
//! - [`bibframe`] - RDF model, wire vocabulary, and the two walkers
//! - [`converter`] - the conversion engine
//! - [`profile`] - declarative mapping profiles
//! - [`registry`] - mapper unit lookup
//! - [`units`] - built-in mapper units
//! - [`resource`] - the resource graph
//! - [`mock`] - placeholders for unresolved references
//! - [`batch`] - parallel conversion of many graphs
//! - [`error`] - error types and result type

pub mod batch;
pub mod bibframe;
pub mod converter;
pub mod error;
pub mod fingerprint;
pub mod label;
pub mod mock;
pub mod profile;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod resource;
pub mod units;
pub mod vocab;

pub use converter::Converter;
pub use error::{ConversionError, Result};
pub use fingerprint::{Fingerprinter, Sha256Fingerprinter};
pub use label::{LabelGenerator, PropertyLabelGenerator};
pub use profile::{EdgeMapping, MappingProfile};
pub use registry::{UnitKey, UnitPattern, UnitRegistry};
pub use report::{ConversionReport, Omission, OmissionReason};
pub use resolver::{MapResolver, ResourceResolver};
pub use resource::{Link, Resource, ResourceGraph, ResourceId};
