//! Titles and the resources labelled by them.
//!
//! A title reads as its main title followed by the subtitle. Instances and
//! works take the label of their first plain title, falling back to a
//! variant or parallel title only when no plain one is present.

use crate::label::LabelGenerator;
use crate::resource::{Resource, ResourceGraph};
use crate::vocab::{predicates, properties, types};

use super::MapperUnit;

/// Titles: labelled with the main title followed by the subtitle.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleUnit;

impl MapperUnit for TitleUnit {
    fn name(&self) -> &'static str {
        "title"
    }

    fn label(
        &self,
        resource: &Resource,
        _graph: &ResourceGraph,
        labels: &dyn LabelGenerator,
    ) -> String {
        let parts: Vec<&str> = [properties::MAIN_TITLE, properties::SUBTITLE]
            .into_iter()
            .filter_map(|property| resource.property(property))
            .flatten()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .collect();
        if parts.is_empty() {
            labels.label(resource)
        } else {
            parts.join(" ")
        }
    }
}

/// Works and instances: labelled after their title.
///
/// A plain `TITLE` child is preferred over parallel or variant titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitledResourceUnit;

impl MapperUnit for TitledResourceUnit {
    fn name(&self) -> &'static str {
        "titled-resource"
    }

    fn label(
        &self,
        resource: &Resource,
        graph: &ResourceGraph,
        labels: &dyn LabelGenerator,
    ) -> String {
        let titles: Vec<&Resource> = resource
            .targets(predicates::TITLE)
            .filter_map(|id| graph.get(id))
            .filter(|title| !title.label.is_empty())
            .collect();
        titles
            .iter()
            .find(|title| title.has_type(types::TITLE))
            .or_else(|| titles.first())
            .map_or_else(|| labels.label(resource), |title| title.label.clone())
    }
}
