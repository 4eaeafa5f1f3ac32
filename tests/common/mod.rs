//! Common test helpers shared across the integration suites.

#![allow(dead_code)]

use bibld::bibframe::namespaces::{
    mads as mads_terms, properties as bf_props, rdf, BF, BFLC, LC_NAMES, LC_SUBJECTS, MADSRDF,
    MSTATUS, RDFS, RELATORS,
};
use bibld::bibframe::{RdfGraph, RdfNode};
use bibld::Converter;

pub fn bf(local: &str) -> String {
    format!("{BF}{local}")
}

pub fn mads(local: &str) -> String {
    format!("{MADSRDF}{local}")
}

pub fn converter() -> Converter {
    Converter::standard().expect("standard converter")
}

/// Builds BIBFRAME test graphs around a single instance and its work.
pub struct WireBuilder {
    pub graph: RdfGraph,
    pub instance: RdfNode,
    pub work: RdfNode,
    next: usize,
}

impl WireBuilder {
    /// Instance `_:instance` with one title, described by work `_:work`.
    pub fn new(main_title: &str, work_label: &str) -> Self {
        let mut graph = RdfGraph::new();
        let instance = RdfNode::blank("instance");
        graph.add_type(&instance, bf("Instance"));
        let work = RdfNode::blank("work");
        graph.add_type(&work, bf("Work"));
        graph.add(work.clone(), format!("{RDFS}label"), RdfNode::literal(work_label));
        graph.add(work.clone(), bf(bf_props::HAS_INSTANCE), instance.clone());

        let mut builder = Self {
            graph,
            instance,
            work,
            next: 0,
        };
        let instance = builder.instance.clone();
        builder.title(&instance, "Title", main_title);
        builder
    }

    pub fn blank(&mut self, prefix: &str) -> RdfNode {
        self.next += 1;
        RdfNode::blank(format!("{prefix}{}", self.next))
    }

    /// Adds a title of the given BIBFRAME class to `owner`.
    pub fn title(&mut self, owner: &RdfNode, class: &str, main_title: &str) -> RdfNode {
        let title = self.blank("title");
        self.graph.add_type(&title, bf(class));
        self.graph
            .add(title.clone(), bf("mainTitle"), RdfNode::literal(main_title));
        self.graph.add(owner.clone(), bf("title"), title.clone());
        title
    }

    /// Adds a described person with an optional current LCCN.
    pub fn person(&mut self, name: &str, lccn: Option<&str>) -> RdfNode {
        let person = self.blank("person");
        self.graph.add_type(&person, bf("Person"));
        self.graph
            .add(person.clone(), format!("{RDFS}label"), RdfNode::literal(name));
        if let Some(lccn) = lccn {
            let identifier = self.blank("lccn");
            self.graph.add_type(&identifier, bf("Lccn"));
            self.graph.add(
                identifier.clone(),
                rdf::VALUE,
                RdfNode::literal(lccn),
            );
            self.graph.add(
                identifier.clone(),
                bf("status"),
                RdfNode::uri(format!("{MSTATUS}current")),
            );
            self.graph.add(person.clone(), bf(bf_props::IDENTIFIED_BY), identifier);
        }
        person
    }

    /// A person known only by its authority IRI.
    pub fn external_person(&mut self, lccn: &str) -> RdfNode {
        let person = RdfNode::uri(format!("{LC_NAMES}{lccn}"));
        self.graph.add_type(&person, bf("Person"));
        person
    }

    /// Links `agent` to the work through a contribution.
    pub fn contribution(&mut self, agent: &RdfNode, primary: bool, roles: &[&str]) {
        let contribution = self.blank("contribution");
        self.graph.add_type(&contribution, bf("Contribution"));
        if primary {
            self.graph
                .add_type(&contribution, format!("{BFLC}PrimaryContribution"));
        }
        self.graph
            .add(contribution.clone(), bf("agent"), agent.clone());
        for role in roles {
            self.graph.add(
                contribution.clone(),
                bf("role"),
                RdfNode::uri(format!("{RELATORS}{role}")),
            );
        }
        self.graph
            .add(self.work.clone(), bf("contribution"), contribution);
    }

    /// Adds a described MADS term of the given class.
    pub fn term(&mut self, class: &str, label: &str) -> RdfNode {
        let term = self.blank("term");
        self.graph.add_type(&term, mads(class));
        self.graph.add(
            term.clone(),
            mads(mads_terms::AUTHORITATIVE_LABEL),
            RdfNode::literal(label),
        );
        term
    }

    /// A subject term known only by its authority IRI.
    pub fn external_term(&mut self, class: &str, id: &str) -> RdfNode {
        let term = RdfNode::uri(format!("{LC_SUBJECTS}{id}"));
        self.graph.add_type(&term, mads(class));
        term
    }

    /// Adds a complex subject with the given components to the work.
    pub fn complex_subject(&mut self, components: Vec<RdfNode>) -> RdfNode {
        let subject = self.blank("subject");
        self.graph.add_type(&subject, mads("ComplexSubject"));
        let list = self.graph.add_list(components);
        self.graph
            .add(subject.clone(), mads("componentList"), list);
        self.graph
            .add(self.work.clone(), bf("subject"), subject.clone());
        subject
    }

    pub fn build(self) -> RdfGraph {
        self.graph
    }
}
