#![allow(missing_docs)]
//! Benchmarks for BIBFRAME ↔ resource graph conversion.
//!
//! Inputs are synthetic: one instance with a handful of titles and
//! identifiers, described by a work with contributors and complex subjects.

use bibld::batch::to_ld_batch;
use bibld::bibframe::namespaces::{
    mads as mads_terms, properties as bf_props, rdf, BF, BFLC, MADSRDF, RDFS, RELATORS,
};
use bibld::bibframe::{RdfFormat, RdfGraph, RdfNode};
use bibld::Converter;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bf(local: &str) -> String {
    format!("{BF}{local}")
}

fn mads(local: &str) -> String {
    format!("{MADSRDF}{local}")
}

/// Builds one catalog description; `n` varies the literals.
fn sample_graph(n: usize) -> RdfGraph {
    let mut g = RdfGraph::new();
    let instance = RdfNode::blank(format!("instance{n}"));
    g.add_type(&instance, bf("Instance"));
    g.add(instance.clone(), bf("dimensions"), RdfNode::literal("24 cm"));
    for (i, class) in ["Title", "VariantTitle", "ParallelTitle"].iter().enumerate() {
        let title = RdfNode::blank(format!("title{n}_{i}"));
        g.add_type(&title, bf(class));
        g.add(title.clone(), bf("mainTitle"), RdfNode::literal(format!("Title {n} {i}")));
        g.add(instance.clone(), bf("title"), title);
    }
    let isbn = RdfNode::blank(format!("isbn{n}"));
    g.add_type(&isbn, bf("Isbn"));
    g.add(isbn.clone(), rdf::VALUE, RdfNode::literal(format!("978{n:010}")));
    g.add(instance.clone(), bf(bf_props::IDENTIFIED_BY), isbn);

    let work = RdfNode::blank(format!("work{n}"));
    g.add_type(&work, bf("Work"));
    g.add(work.clone(), format!("{RDFS}label"), RdfNode::literal(format!("Work {n}")));
    g.add(work.clone(), bf(bf_props::HAS_INSTANCE), instance);

    for a in 0..3 {
        let agent = RdfNode::blank(format!("agent{n}_{a}"));
        g.add_type(&agent, bf("Person"));
        g.add(agent.clone(), format!("{RDFS}label"), RdfNode::literal(format!("Agent {n} {a}")));
        let contribution = RdfNode::blank(format!("contribution{n}_{a}"));
        g.add_type(&contribution, bf("Contribution"));
        if a == 0 {
            g.add_type(&contribution, format!("{BFLC}PrimaryContribution"));
        }
        g.add(contribution.clone(), bf("agent"), agent);
        g.add(contribution.clone(), bf("role"), RdfNode::uri(format!("{RELATORS}aut")));
        g.add(work.clone(), bf("contribution"), contribution);
    }

    for s in 0..2 {
        let topic = RdfNode::blank(format!("topic{n}_{s}"));
        g.add_type(&topic, mads("Topic"));
        let topic_label = RdfNode::literal(format!("Topic {s}"));
        g.add(topic.clone(), mads(mads_terms::AUTHORITATIVE_LABEL), topic_label);
        let place = RdfNode::blank(format!("place{n}_{s}"));
        g.add_type(&place, mads(mads_terms::GEOGRAPHIC));
        let place_label = RdfNode::literal(format!("Place {n}"));
        g.add(place.clone(), mads(mads_terms::AUTHORITATIVE_LABEL), place_label);
        let subject = RdfNode::blank(format!("subject{n}_{s}"));
        g.add_type(&subject, mads("ComplexSubject"));
        let list = g.add_list(vec![topic, place]);
        g.add(subject.clone(), mads("componentList"), list);
        g.add(work.clone(), bf("subject"), subject);
    }
    g
}

fn benchmark_to_ld(c: &mut Criterion) {
    let converter = Converter::standard().expect("standard converter");
    let graph = sample_graph(0);

    c.bench_function("bibframe_to_ld_single", |b| {
        b.iter(|| converter.to_ld(black_box(&graph)));
    });
}

fn benchmark_to_rdf(c: &mut Criterion) {
    let converter = Converter::standard().expect("standard converter");
    let resources = converter.to_ld(&sample_graph(0)).expect("conversion failed");

    c.bench_function("ld_to_bibframe_single", |b| {
        b.iter(|| converter.to_rdf(black_box(&resources)));
    });
}

fn benchmark_round_trip_ntriples(c: &mut Criterion) {
    let converter = Converter::standard().expect("standard converter");
    let text = sample_graph(0)
        .serialize(RdfFormat::NTriples)
        .expect("serialization failed");

    c.bench_function("ntriples_parse_convert_emit", |b| {
        b.iter(|| {
            let wire =
                RdfGraph::parse(black_box(&text), RdfFormat::NTriples).expect("parse failed");
            let resources = converter.to_ld(&wire).expect("conversion failed");
            converter.to_rdf(&resources)
        });
    });
}

fn benchmark_batch_1k(c: &mut Criterion) {
    let converter = Converter::standard().expect("standard converter");
    let inputs: Vec<RdfGraph> = (0..1000).map(sample_graph).collect();

    let mut group = c.benchmark_group("batch");
    group.sample_size(10);
    group.bench_function("to_ld_batch_1k", |b| {
        b.iter(|| to_ld_batch(&converter, black_box(&inputs)));
    });
    group.bench_function("to_ld_sequential_1k", |b| {
        b.iter(|| {
            inputs
                .iter()
                .map(|graph| converter.to_ld(graph))
                .collect::<Vec<_>>()
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_to_ld,
    benchmark_to_rdf,
    benchmark_round_trip_ntriples,
    benchmark_batch_1k
);
criterion_main!(benches);
