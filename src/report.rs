//! Conversion diagnostics.
//!
//! Conditions the mappers recover from locally (a rejected complex subject, a
//! cycle in the wire data, a placeholder created for an external reference)
//! are logged and recorded here so callers can audit what a conversion did
//! not carry over.

use std::fmt;

use crate::resource::ResourceId;

/// Why something was left out of a conversion result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OmissionReason {
    /// A complex subject's component list had fewer than two entries.
    TooFewComponents(usize),
    /// A complex subject's focus could not be mapped.
    FocusNotMapped,
    /// A complex subject's focus mapped to a bare concept.
    ConceptFocus,
    /// A complex subject component matched no declared edge.
    ComponentNotMapped,
    /// The wire node was already being converted further up the walk.
    Cycle,
    /// No profile root matches a resource graph root.
    NoRootMapping,
    /// A link points at a resource the graph does not hold.
    DanglingLink(ResourceId),
    /// A mock has no namespace to build an external IRI from.
    UnlinkableMock,
}

impl fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewComponents(n) => {
                write!(f, "complex subject has {n} component(s), need at least 2")
            },
            Self::FocusNotMapped => write!(f, "complex subject focus could not be mapped"),
            Self::ConceptFocus => write!(f, "complex subject focus is itself a concept"),
            Self::ComponentNotMapped => {
                write!(f, "complex subject component matches no edge mapping")
            },
            Self::Cycle => write!(f, "cycle in wire data"),
            Self::NoRootMapping => write!(f, "no profile root matches resource types"),
            Self::DanglingLink(id) => write!(f, "link to missing resource {id}"),
            Self::UnlinkableMock => write!(f, "mock resource has no external namespace"),
        }
    }
}

/// One recorded omission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission {
    /// The wire node or resource the omission concerns.
    pub node: String,
    /// What happened.
    pub reason: OmissionReason,
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.node, self.reason)
    }
}

/// Diagnostics collected during one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Data that was skipped.
    pub omissions: Vec<Omission>,
    /// External keys for which a mock resource was created, each once.
    pub mocked: Vec<String>,
}

impl ConversionReport {
    /// Returns true if nothing was omitted or mocked.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.omissions.is_empty() && self.mocked.is_empty()
    }

    /// Returns true if an omission with this reason was recorded.
    #[must_use]
    pub fn has_omission(&self, reason: &OmissionReason) -> bool {
        self.omissions.iter().any(|o| &o.reason == reason)
    }

    /// Records a mocked key unless it is already listed.
    pub(crate) fn record_mock(&mut self, key: &str) {
        if !self.mocked.iter().any(|k| k == key) {
            self.mocked.push(key.to_string());
        }
    }
}
