//! Display label generation.
//!
//! Mapper units that know how to label their resources (titles, instances,
//! complex subjects) do so themselves; everything else goes through a
//! [`LabelGenerator`].

use std::fmt;

use crate::resource::Resource;
use crate::vocab::properties;

/// Turns a resource's attributes into a display string.
pub trait LabelGenerator: Send + Sync + fmt::Debug {
    /// Returns the label for a resource under construction.
    fn label(&self, resource: &Resource) -> String;
}

/// Labels a resource with the values of the first present property from an
/// ordered list of candidates, joined with `", "`.
#[derive(Debug, Clone)]
pub struct PropertyLabelGenerator {
    candidates: Vec<String>,
}

impl PropertyLabelGenerator {
    /// Creates a generator with a custom candidate list.
    #[must_use]
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for PropertyLabelGenerator {
    fn default() -> Self {
        Self::new([
            properties::NAME,
            properties::LABEL,
            properties::MAIN_TITLE,
            properties::SIMPLE_PLACE,
            properties::DATE,
        ])
    }
}

impl LabelGenerator for PropertyLabelGenerator {
    fn label(&self, resource: &Resource) -> String {
        self.candidates
            .iter()
            .filter_map(|candidate| resource.property(candidate))
            .find(|values| values.iter().any(|v| !v.trim().is_empty()))
            .map(|values| {
                values
                    .iter()
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }
}
