//! Mock creation during conversion and resolution afterwards.

mod common;

use bibld::bibframe::namespaces::{rdf, LC_NAMES};
use bibld::bibframe::RdfNode;
use bibld::mock::{is_mock, mock_key};
use bibld::vocab::{predicates, properties, types};
use bibld::{MapResolver, Resource, ResourceGraph, Sha256Fingerprinter};

use common::{bf, converter, WireBuilder};

const GOGOL: &str = "n79000000";

fn person_fragment(name: &str) -> ResourceGraph {
    let mut fragment = ResourceGraph::new();
    let mut person = Resource::new([types::PERSON]);
    person.add_property(properties::NAME, name);
    let id = fragment.add(person, &Sha256Fingerprinter);
    fragment.add_root(id);
    fragment
}

fn wire_with_external_creator() -> bibld::bibframe::RdfGraph {
    let mut wire = WireBuilder::new("Vij", "X");
    let gogol = wire.external_person(GOGOL);
    wire.contribution(&gogol, true, &["aut"]);
    wire.build()
}

fn creator(graph: &ResourceGraph) -> &Resource {
    let instance = graph.root_resources().next().expect("instance root");
    let work = instance
        .incoming
        .iter()
        .find_map(|link| graph.get(link.node))
        .expect("work");
    work.targets(predicates::CREATOR)
        .next()
        .and_then(|id| graph.get(id))
        .expect("creator")
}

#[test]
fn test_external_agent_becomes_mock() {
    let (graph, report) = converter()
        .to_ld_with_report(&wire_with_external_creator())
        .expect("conversion failed");

    assert_eq!(report.mocked, vec![GOGOL.to_string()]);
    let agent = creator(&graph);
    assert!(is_mock(agent));
    assert_eq!(mock_key(agent), Some(GOGOL));
    assert!(agent.has_type(types::PERSON));
    assert_eq!(converter().gather_mock_keys(&graph), vec![GOGOL.to_string()]);
}

#[test]
fn test_resolver_is_consulted_during_conversion() {
    let resolver = MapResolver::new().with(GOGOL, person_fragment("Gogol, Nikolai"));
    let converter = converter().with_resolver(resolver);
    let (graph, report) = converter
        .to_ld_with_report(&wire_with_external_creator())
        .expect("conversion failed");

    assert!(report.mocked.is_empty());
    let agent = creator(&graph);
    assert!(!is_mock(agent));
    assert_eq!(agent.label, "Gogol, Nikolai");
}

#[test]
fn test_unmock_replaces_mock_and_recomputes_ancestors() {
    let converter = converter();
    let graph = converter
        .to_ld(&wire_with_external_creator())
        .expect("conversion failed");
    let old_instance = graph.roots().next().expect("root");
    let old_work = graph
        .get(old_instance)
        .and_then(|instance| instance.incoming.first())
        .map(|link| link.node)
        .expect("work");

    let resolver = MapResolver::new().with(GOGOL, person_fragment("Gogol, Nikolai"));
    let resolved = converter.unmock_with(&graph, &resolver).expect("unmock failed");

    // The instance does not hash its incoming work link.
    assert_eq!(resolved.roots().next(), Some(old_instance));
    let agent = creator(&resolved);
    assert!(!is_mock(agent));
    assert_eq!(agent.label, "Gogol, Nikolai");

    let instance = resolved.get(old_instance).expect("instance kept");
    let new_work = instance.incoming.first().map(|link| link.node).expect("work");
    assert_ne!(new_work, old_work);
    assert!(resolved.get(old_work).is_none());

    let work = resolved.get(new_work).expect("work stored");
    let agent_id = agent.id().expect("finalized");
    assert_eq!(work.targets(predicates::AUTHOR).collect::<Vec<_>>(), vec![agent_id]);
    assert!(converter.gather_mock_keys(&resolved).is_empty());
}

#[test]
fn test_unmock_is_idempotent() {
    let graph = converter()
        .to_ld(&wire_with_external_creator())
        .expect("conversion failed");

    let resolver = MapResolver::new().with(GOGOL, person_fragment("Gogol, Nikolai"));
    let converter = converter().with_resolver(resolver);
    let once = converter.unmock(&graph).expect("unmock failed");
    let twice = converter.unmock(&once).expect("unmock failed");
    assert_eq!(once, twice);
}

#[test]
fn test_unresolved_mock_stays_in_place() {
    let converter = converter();
    let graph = converter
        .to_ld(&wire_with_external_creator())
        .expect("conversion failed");
    let result = converter
        .unmock_with(&graph, &MapResolver::new())
        .expect("unmock failed");
    assert_eq!(result, graph);
}

#[test]
fn test_mock_is_written_as_authority_link() {
    let converter = converter();
    let graph = converter
        .to_ld(&wire_with_external_creator())
        .expect("conversion failed");
    let rdf = converter.to_rdf(&graph).expect("emit failed");

    let authority = RdfNode::uri(format!("{LC_NAMES}{GOGOL}"));
    assert!(rdf
        .triples()
        .any(|t| t.predicate == bf("agent") && t.object == authority));
    assert!(!rdf
        .triples()
        .any(|t| t.subject == authority && t.predicate != rdf::TYPE));
}

#[test]
fn test_agent_mocked_as_creator_and_subject_focus() {
    let mut wire = WireBuilder::new("Vij", "X");
    let gogol = wire.external_person(GOGOL);
    wire.contribution(&gogol, true, &["aut"]);
    let criticism = wire.term("Topic", "Criticism");
    wire.complex_subject(vec![gogol, criticism]);
    let converter = converter();
    let (graph, report) = converter
        .to_ld_with_report(&wire.build())
        .expect("conversion failed");
    assert_eq!(report.mocked, vec![GOGOL.to_string()]);
    assert_eq!(converter.gather_mock_keys(&graph), vec![GOGOL.to_string()]);

    let resolver = MapResolver::new().with(GOGOL, person_fragment("Gogol, Nikolai"));
    let resolved = converter.unmock_with(&graph, &resolver).expect("unmock failed");
    assert!(converter.gather_mock_keys(&resolved).is_empty());
    assert!(resolved.resources().all(|resource| !is_mock(resource)));

    let work = resolved
        .root_resources()
        .next()
        .and_then(|instance| instance.incoming.first())
        .and_then(|link| resolved.get(link.node))
        .expect("work");
    let concept = work
        .targets(predicates::SUBJECT)
        .next()
        .and_then(|id| resolved.get(id))
        .expect("subject");
    assert_eq!(concept.label, "Gogol, Nikolai -- Criticism");
    assert_eq!(creator(&resolved).label, "Gogol, Nikolai");
}
