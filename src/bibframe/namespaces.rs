//! BIBFRAME namespace definitions and constants.
//!
//! This module defines the RDF namespace prefixes and the wire terms the
//! built-in mapper units rely on. Everything else is named by the mapping
//! profile.

/// BIBFRAME 2.0 namespace URI.
pub const BF: &str = "http://id.loc.gov/ontologies/bibframe/";

/// BIBFRAME Library of Congress extensions namespace URI.
pub const BFLC: &str = "http://id.loc.gov/ontologies/bflc/";

/// MADS/RDF namespace (Metadata Authority Description Schema).
pub const MADSRDF: &str = "http://www.loc.gov/mads/rdf/v1#";

/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// RDF Schema namespace.
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// XML Schema namespace.
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

/// LOC relators vocabulary namespace.
pub const RELATORS: &str = "http://id.loc.gov/vocabulary/relators/";

/// LOC identifier status vocabulary namespace.
pub const MSTATUS: &str = "http://id.loc.gov/vocabulary/mstatus/";

/// LOC names authority namespace.
pub const LC_NAMES: &str = "http://id.loc.gov/authorities/names/";

/// LOC subjects authority namespace.
pub const LC_SUBJECTS: &str = "http://id.loc.gov/authorities/subjects/";

/// Prefixes every profile may use without declaring them.
#[must_use]
pub fn standard_prefixes() -> [(&'static str, &'static str); 8] {
    [
        ("bf", BF),
        ("bflc", BFLC),
        ("madsrdf", MADSRDF),
        ("rdf", RDF),
        ("rdfs", RDFS),
        ("xsd", XSD),
        ("relators", RELATORS),
        ("mstatus", MSTATUS),
    ]
}

/// RDF vocabulary terms (full IRIs).
pub mod rdf {
    /// `rdf:type`.
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    /// `rdf:value`.
    pub const VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
    /// `rdf:first` - head of a list cell.
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    /// `rdf:rest` - tail of a list cell.
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    /// `rdf:nil` - empty list terminator.
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    /// `rdfs:label`.
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// Common BIBFRAME class local names.
pub mod classes {
    /// Work - the conceptual essence of a resource.
    pub const WORK: &str = "Work";
    /// Instance - a material embodiment of a Work.
    pub const INSTANCE: &str = "Instance";
    /// Title class.
    pub const TITLE: &str = "Title";
    /// Contribution class.
    pub const CONTRIBUTION: &str = "Contribution";
    /// Person agent type.
    pub const PERSON: &str = "Person";
    /// Organization agent type.
    pub const ORGANIZATION: &str = "Organization";
    /// Family agent type.
    pub const FAMILY: &str = "Family";
    /// Topic subject type.
    pub const TOPIC: &str = "Topic";
    /// LCCN identifier type.
    pub const LCCN: &str = "Lccn";
}

/// Common BIBFRAME property local names.
pub mod properties {
    /// contribution - links to Contribution.
    pub const CONTRIBUTION: &str = "contribution";
    /// agent - agent of contribution.
    pub const AGENT: &str = "agent";
    /// role - relator role.
    pub const ROLE: &str = "role";
    /// subject - general subject property.
    pub const SUBJECT: &str = "subject";
    /// hasInstance - links Work to Instance.
    pub const HAS_INSTANCE: &str = "hasInstance";
    /// title - general title property.
    pub const TITLE: &str = "title";
    /// mainTitle - primary title text.
    pub const MAIN_TITLE: &str = "mainTitle";
    /// identifiedBy - links to Identifier.
    pub const IDENTIFIED_BY: &str = "identifiedBy";
    /// status - identifier status.
    pub const STATUS: &str = "status";
}

/// BFLC extension local names.
pub mod bflc {
    /// Primary contribution marker.
    pub const PRIMARY_CONTRIBUTION: &str = "PrimaryContribution";
}

/// MADS/RDF local names.
pub mod mads {
    /// Complex subject class.
    pub const COMPLEX_SUBJECT: &str = "ComplexSubject";
    /// Ordered component list of a complex subject.
    pub const COMPONENT_LIST: &str = "componentList";
    /// Authoritative label.
    pub const AUTHORITATIVE_LABEL: &str = "authoritativeLabel";
    /// Topic class.
    pub const TOPIC: &str = "Topic";
    /// Geographic class.
    pub const GEOGRAPHIC: &str = "Geographic";
    /// Temporal class.
    pub const TEMPORAL: &str = "Temporal";
}
