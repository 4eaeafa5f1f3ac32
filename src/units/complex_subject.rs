//! Complex subjects.
//!
//! A `madsrdf:ComplexSubject` lists its components in order: a focus
//! followed by one or more subdivisions. Internally the list becomes a single
//! concept that copies the focus's document, links the focus by `FOCUS` and
//! each subdivision by `SUB_FOCUS`, and records each subdivision's label
//! under a property chosen by its type.

use tracing::debug;

use crate::bibframe::namespaces::{mads, rdf, MADSRDF};
use crate::bibframe::rdf::RdfNode;
use crate::bibframe::to_ld::LdMapper;
use crate::bibframe::to_rdf::RdfMapper;
use crate::error::Result;
use crate::label::LabelGenerator;
use crate::mock;
use crate::profile::{best_match, EdgeMapping};
use crate::report::OmissionReason;
use crate::resource::{Resource, ResourceGraph, ResourceId};
use crate::vocab::{predicates, properties, types};

use super::{authority_node, MapperUnit};

const LABEL_SEPARATOR: &str = " -- ";

/// Complex subjects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexSubjectUnit;

fn subdivision_property(sub_focus: &Resource) -> &'static str {
    if sub_focus.has_type(types::PLACE) {
        properties::GEOGRAPHIC_SUBDIVISION
    } else if sub_focus.has_type(types::FORM) {
        properties::FORM_SUBDIVISION
    } else if sub_focus.has_type(types::TEMPORAL) {
        properties::CHRONOLOGICAL_SUBDIVISION
    } else {
        properties::GENERAL_SUBDIVISION
    }
}

fn is_bare_concept(resource: &Resource) -> bool {
    resource.types.len() == 1 && resource.has_type(types::CONCEPT)
}

/// Assembles the concept for a focus and its sub-foci. Links and document
/// are derived from the current state of `graph`; the result has no id.
fn synthesize(
    focus: ResourceId,
    sub_foci: &[ResourceId],
    graph: &ResourceGraph,
    labels: &dyn LabelGenerator,
) -> Option<Resource> {
    let focus_resource = graph.get(focus)?;
    let mut concept = Resource::new(focus_resource.types.iter().cloned());
    concept.types.insert(types::CONCEPT.to_string());
    for (property, values) in &focus_resource.doc {
        if property == properties::PREFERRED || property == properties::LABEL {
            continue;
        }
        for value in values {
            concept.add_property(property.clone(), value.clone());
        }
    }
    concept.add_outgoing(predicates::FOCUS, focus);
    let mut has_mock = focus_resource.is_mock();
    let mut label_parts = vec![component_label(focus_resource, labels)];
    for &sub in sub_foci {
        let Some(sub_resource) = graph.get(sub) else {
            continue;
        };
        concept.add_outgoing(predicates::SUB_FOCUS, sub);
        let label = component_label(sub_resource, labels);
        concept.add_property(subdivision_property(sub_resource), label.clone());
        label_parts.push(label);
        has_mock |= sub_resource.is_mock();
    }
    concept.label = label_parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(LABEL_SEPARATOR);
    concept.has_mock = has_mock;
    Some(concept)
}

/// A mock component contributes its external key, so the concept label never
/// carries the mock prefix.
fn component_label(resource: &Resource, labels: &dyn LabelGenerator) -> String {
    if let Some(key) = mock::mock_key(resource) {
        key.to_string()
    } else if resource.label.is_empty() {
        labels.label(resource)
    } else {
        resource.label.clone()
    }
}

fn component_edges<'e>(edge: &'e EdgeMapping, predicate: &str) -> Vec<&'e EdgeMapping> {
    edge.resource_mapping
        .outgoing_edges
        .iter()
        .filter(|nested| nested.ld_predicate() == Some(predicate))
        .collect()
}

impl ComplexSubjectUnit {
    fn map_component(
        mapper: &mut LdMapper<'_>,
        node: &RdfNode,
        edges: &[&EdgeMapping],
    ) -> Result<Option<ResourceId>> {
        let node_types = mapper.index().types_of(node);
        let Some(edge) =
            best_match(edges.iter().copied(), |e| &e.bf_resource_def.type_set, &node_types)
        else {
            return Ok(None);
        };
        mapper.map_resource(node, edge)
    }
}

impl MapperUnit for ComplexSubjectUnit {
    fn name(&self) -> &'static str {
        "complex-subject"
    }

    fn to_ld(
        &self,
        mapper: &mut LdMapper<'_>,
        node: &RdfNode,
        edge: &EdgeMapping,
    ) -> Result<Option<ResourceId>> {
        let component_list = format!("{MADSRDF}{}", mads::COMPONENT_LIST);
        let head = mapper.index().objects(node, &component_list).first().map(|n| (*n).clone());
        let components: Vec<RdfNode> = match head {
            Some(head) => mapper.index().read_list(&head)?.into_iter().cloned().collect(),
            None => Vec::new(),
        };
        let subject = node.to_string();
        if components.len() < 2 {
            mapper.omit(&subject, OmissionReason::TooFewComponents(components.len()))?;
            return Ok(None);
        }

        let focus_edges = component_edges(edge, predicates::FOCUS);
        let sub_edges = component_edges(edge, predicates::SUB_FOCUS);

        let Some(focus) = Self::map_component(mapper, &components[0], &focus_edges)? else {
            mapper.omit(&subject, OmissionReason::FocusNotMapped)?;
            return Ok(None);
        };
        if mapper.graph().get(focus).is_some_and(is_bare_concept) {
            mapper.omit(&subject, OmissionReason::ConceptFocus)?;
            return Ok(None);
        }

        let mut sub_foci = Vec::with_capacity(components.len() - 1);
        for component in &components[1..] {
            match Self::map_component(mapper, component, &sub_edges)? {
                Some(id) => sub_foci.push(id),
                None => {
                    mapper.omit(&component.to_string(), OmissionReason::ComponentNotMapped)?;
                    return Ok(None);
                },
            }
        }

        let labels = mapper.converter().labels();
        let Some(concept) = synthesize(focus, &sub_foci, mapper.graph(), labels) else {
            return Ok(None);
        };
        debug!(subject = %subject, label = %concept.label, "synthesized complex subject");
        let label = concept.label.clone();
        Ok(Some(mapper.finalize(concept, label)))
    }

    fn label(
        &self,
        resource: &Resource,
        graph: &ResourceGraph,
        labels: &dyn LabelGenerator,
    ) -> String {
        let focus = resource.targets(predicates::FOCUS).next();
        let sub_foci: Vec<ResourceId> = resource.targets(predicates::SUB_FOCUS).collect();
        focus
            .and_then(|focus| synthesize(focus, &sub_foci, graph, labels))
            .map_or_else(|| labels.label(resource), |concept| concept.label)
    }

    fn rebuild(
        &self,
        resource: Resource,
        graph: &ResourceGraph,
        labels: &dyn LabelGenerator,
    ) -> Resource {
        let focus = resource.targets(predicates::FOCUS).next();
        let sub_foci: Vec<ResourceId> = resource.targets(predicates::SUB_FOCUS).collect();
        match focus.and_then(|focus| synthesize(focus, &sub_foci, graph, labels)) {
            Some(mut concept) => {
                concept.incoming = resource.incoming;
                concept
            },
            None => {
                let mut resource = resource;
                resource.id = None;
                resource.label = labels.label(&resource);
                resource
            },
        }
    }

    fn to_rdf(
        &self,
        mapper: &mut RdfMapper<'_>,
        id: ResourceId,
        edge: &EdgeMapping,
    ) -> Result<RdfNode> {
        if let Some(node) = mapper.emitted(id) {
            return Ok(node);
        }
        let source = mapper.source();
        let Some(concept) = source.get(id) else {
            return mapper.emit_resource(id, edge);
        };
        let Some(focus) = concept.targets(predicates::FOCUS).next() else {
            return mapper.emit_resource(id, edge);
        };

        let node = mapper.node_for(id);
        mapper.remember(id, node.clone());
        mapper.emit_types(&node, edge);
        if !concept.label.is_empty() {
            mapper
                .graph_mut()
                .add(node.clone(), rdf::LABEL, RdfNode::literal(concept.label.clone()));
        }

        let focus_edges = component_edges(edge, predicates::FOCUS);
        let sub_edges = component_edges(edge, predicates::SUB_FOCUS);
        let components = std::iter::once((focus, &focus_edges))
            .chain(concept.targets(predicates::SUB_FOCUS).map(|sub| (sub, &sub_edges)));

        let mut items = Vec::new();
        for (component, edges) in components {
            let Some(target) = source.get(component) else {
                continue;
            };
            let Some(component_edge) =
                best_match(edges.iter().copied(), |e| &e.ld_resource_def.type_set, &target.types)
            else {
                mapper.omit(&component.to_string(), OmissionReason::ComponentNotMapped)?;
                continue;
            };
            let item = match authority_node(mapper, target, component_edge) {
                Some(link) => link,
                None => mapper.emit_dispatched(component, component_edge)?,
            };
            items.push(item);
        }

        let list = mapper.graph_mut().add_list(items);
        mapper
            .graph_mut()
            .add(node.clone(), format!("{MADSRDF}{}", mads::COMPONENT_LIST), list);
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::fingerprint::Sha256Fingerprinter;
    use crate::label::PropertyLabelGenerator;

    fn term(graph: &mut ResourceGraph, type_tag: &str, name: &str) -> ResourceId {
        let mut resource = Resource::new([type_tag]);
        resource.add_property(properties::NAME, name);
        resource.label = name.to_string();
        graph.add(resource, &Sha256Fingerprinter)
    }

    #[test]
    fn test_synthesize_copies_focus_and_adds_subdivisions() {
        let labels = PropertyLabelGenerator::default();
        let mut graph = ResourceGraph::new();
        let mut focus = Resource::new([types::PERSON]);
        focus.add_property(properties::NAME, "Gogol, Nikolai");
        focus.add_property(properties::PREFERRED, "true");
        focus.add_property(properties::LABEL, "Gogol");
        focus.label = "Gogol, Nikolai".into();
        let focus_id = graph.add(focus, &Sha256Fingerprinter);
        let topic = term(&mut graph, types::TOPIC, "Criticism");
        let place = term(&mut graph, types::PLACE, "Ukraine");
        let form = term(&mut graph, types::FORM, "Bibliography");
        let era = term(&mut graph, types::TEMPORAL, "19th century");

        let sub_foci = [topic, place, form, era];
        let concept = synthesize(focus_id, &sub_foci, &graph, &labels).expect("focus present");

        assert_eq!(
            concept.types,
            BTreeSet::from([types::PERSON.to_string(), types::CONCEPT.to_string()])
        );
        assert_eq!(concept.first_property(properties::NAME), Some("Gogol, Nikolai"));
        assert!(concept.property(properties::PREFERRED).is_none());
        assert!(concept.property(properties::LABEL).is_none());
        assert_eq!(concept.first_property(properties::GENERAL_SUBDIVISION), Some("Criticism"));
        assert_eq!(concept.first_property(properties::GEOGRAPHIC_SUBDIVISION), Some("Ukraine"));
        assert_eq!(concept.first_property(properties::FORM_SUBDIVISION), Some("Bibliography"));
        assert_eq!(
            concept.first_property(properties::CHRONOLOGICAL_SUBDIVISION),
            Some("19th century")
        );
        assert_eq!(
            concept.label,
            "Gogol, Nikolai -- Criticism -- Ukraine -- Bibliography -- 19th century"
        );
        assert_eq!(concept.targets(predicates::FOCUS).collect::<Vec<_>>(), vec![focus_id]);
        assert_eq!(concept.targets(predicates::SUB_FOCUS).count(), 4);
        assert!(!concept.has_mock);
        assert!(concept.id().is_none());
    }

    #[test]
    fn test_mock_component_marks_concept() {
        let fp = Sha256Fingerprinter;
        let labels = PropertyLabelGenerator::default();
        let mut graph = ResourceGraph::new();
        let focus = term(&mut graph, types::TOPIC, "Witchcraft");
        let sub = mock::insert_mock(&mut graph, [types::PLACE], "sh85000001", &fp);

        let concept = synthesize(focus, &[sub], &graph, &labels).expect("focus present");
        assert!(concept.has_mock);
        assert_eq!(concept.label, "Witchcraft -- sh85000001");
    }

    #[test]
    fn test_mock_focus_does_not_make_concept_a_mock() {
        let fp = Sha256Fingerprinter;
        let labels = PropertyLabelGenerator::default();
        let mut graph = ResourceGraph::new();
        let focus = mock::insert_mock(&mut graph, [types::PERSON], "n79000000", &fp);
        let sub = term(&mut graph, types::TOPIC, "Criticism");

        let concept = synthesize(focus, &[sub], &graph, &labels).expect("focus present");
        assert!(concept.has_mock);
        assert!(!mock::is_mock(&concept));
        assert_eq!(concept.label, "n79000000 -- Criticism");
    }

    #[test]
    fn test_bare_concept_detection() {
        assert!(is_bare_concept(&Resource::new([types::CONCEPT])));
        assert!(!is_bare_concept(&Resource::new([types::CONCEPT, types::PERSON])));
        assert!(!is_bare_concept(&Resource::new([types::TOPIC])));
    }
}
