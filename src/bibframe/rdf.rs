//! RDF layer for BIBFRAME.
//!
//! This module provides RDF parsing and serialization using the oxrdfio library,
//! wrapped in a higher-level API tailored for BIBFRAME conversion, plus the
//! query surface the mappers need: an indexed pattern query over a parsed
//! graph, type-set subject selection, and the `rdf:first`/`rdf:rest` list
//! encoding.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::io::{Read, Write};

use oxrdf::vocab::xsd;
use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Quad, Term, Triple};
use oxrdfio::{JsonLdProfileSet, RdfFormat as OxRdfFormat, RdfParser, RdfSerializer};

use crate::error::{ConversionError, Result};

use super::config::RdfFormat;
use super::namespaces::{self, rdf};

/// A single RDF triple (subject, predicate, object).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfTriple {
    /// The subject of the triple.
    pub subject: RdfNode,
    /// The predicate (property) of the triple.
    pub predicate: String,
    /// The object of the triple.
    pub object: RdfNode,
}

impl RdfTriple {
    /// Creates a new RDF triple.
    #[must_use]
    pub fn new(subject: RdfNode, predicate: impl Into<String>, object: RdfNode) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

/// An RDF node (subject or object in a triple).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfNode {
    /// A named node (IRI/URI).
    Uri(String),
    /// A blank node with a local identifier.
    BlankNode(String),
    /// A literal value with optional language tag or datatype.
    Literal {
        /// The literal value.
        value: String,
        /// Optional language tag (e.g., "en", "ja").
        language: Option<String>,
        /// Optional datatype URI.
        datatype: Option<String>,
    },
}

impl RdfNode {
    /// Creates a new URI node.
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    /// Creates a new blank node.
    #[must_use]
    pub fn blank(id: impl Into<String>) -> Self {
        Self::BlankNode(id.into())
    }

    /// Creates a new plain literal.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Creates a new literal with a language tag.
    #[must_use]
    pub fn literal_with_lang(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
            language: Some(lang.into()),
            datatype: None,
        }
    }

    /// Returns true if this is a URI node.
    #[must_use]
    pub const fn is_uri(&self) -> bool {
        matches!(self, Self::Uri(_))
    }

    /// Returns true if this is a blank node.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    /// Returns true if this is a literal.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    /// Creates a BIBFRAME class URI.
    #[must_use]
    pub fn bf_class(class_name: &str) -> Self {
        Self::Uri(format!("{}{}", namespaces::BF, class_name))
    }

    /// Returns the IRI of a URI node.
    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(uri) => Some(uri),
            _ => None,
        }
    }

    /// Returns the lexical value of the node: the IRI, blank node label, or
    /// literal value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Uri(value) | Self::BlankNode(value) | Self::Literal { value, .. } => value,
        }
    }
}

impl fmt::Display for RdfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => write!(f, "<{uri}>"),
            Self::BlankNode(id) => write!(f, "_:{id}"),
            Self::Literal { value, .. } => write!(f, "{value:?}"),
        }
    }
}

/// An RDF graph containing triples.
#[derive(Debug, Clone, Default)]
pub struct RdfGraph {
    /// The triples in this graph.
    triples: Vec<RdfTriple>,
    /// Counter for generating unique blank node IDs.
    blank_node_counter: usize,
}

impl RdfGraph {
    /// Creates a new empty RDF graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a triple to the graph.
    pub fn add_triple(&mut self, triple: RdfTriple) {
        self.triples.push(triple);
    }

    /// Adds a triple from components.
    pub fn add(&mut self, subject: RdfNode, predicate: impl Into<String>, object: RdfNode) {
        self.add_triple(RdfTriple::new(subject, predicate, object));
    }

    /// Generates a new unique blank node ID.
    pub fn new_blank_node(&mut self) -> RdfNode {
        self.blank_node_counter += 1;
        RdfNode::blank(format!("b{}", self.blank_node_counter))
    }

    /// Returns the number of triples in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Returns true if the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Returns an iterator over the triples.
    pub fn triples(&self) -> impl Iterator<Item = &RdfTriple> {
        self.triples.iter()
    }

    /// Returns true if the graph contains the given triple.
    #[must_use]
    pub fn contains(&self, subject: &RdfNode, predicate: &str, object: &RdfNode) -> bool {
        self.triples
            .iter()
            .any(|t| &t.subject == subject && t.predicate == predicate && &t.object == object)
    }

    /// Adds an `rdf:type` triple.
    pub fn add_type(&mut self, node: &RdfNode, type_iri: impl Into<String>) {
        self.add(node.clone(), rdf::TYPE, RdfNode::Uri(type_iri.into()));
    }

    /// Encodes an ordered list as `rdf:first`/`rdf:rest` cells and returns
    /// the list head (`rdf:nil` for an empty list).
    pub fn add_list(&mut self, items: Vec<RdfNode>) -> RdfNode {
        let cells: Vec<RdfNode> = items.iter().map(|_| self.new_blank_node()).collect();
        for (i, item) in items.into_iter().enumerate() {
            self.add(cells[i].clone(), rdf::FIRST, item);
            let rest = cells
                .get(i + 1)
                .cloned()
                .unwrap_or_else(|| RdfNode::uri(rdf::NIL));
            self.add(cells[i].clone(), rdf::REST, rest);
        }
        cells
            .into_iter()
            .next()
            .unwrap_or_else(|| RdfNode::uri(rdf::NIL))
    }

    /// Builds a query index over this graph.
    #[must_use]
    pub fn index(&self) -> GraphIndex<'_> {
        GraphIndex::new(self)
    }

    /// Serializes the graph to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self, format: RdfFormat) -> Result<String> {
        let mut output = Vec::new();
        self.serialize_to_writer(&mut output, format)?;
        String::from_utf8(output).map_err(|e| ConversionError::ParseError(e.to_string()))
    }

    /// Serializes the graph to a writer in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize_to_writer<W: Write>(&self, writer: W, format: RdfFormat) -> Result<()> {
        let ox_format = to_oxrdf_format(format);
        let mut serializer = RdfSerializer::from_format(ox_format).for_writer(writer);

        for triple in &self.triples {
            let ox_triple = to_oxrdf_triple(triple)?;
            serializer.serialize_triple(&ox_triple).map_err(|e| {
                ConversionError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    e.to_string(),
                ))
            })?;
        }

        serializer.finish().map_err(|e| {
            ConversionError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                e.to_string(),
            ))
        })?;

        Ok(())
    }

    /// Parses an RDF graph from a reader in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn parse_from_reader<R: Read>(reader: R, format: RdfFormat) -> Result<Self> {
        let ox_format = to_oxrdf_format(format);
        let parser = RdfParser::from_format(ox_format).for_reader(reader);

        let mut graph = Self::new();

        for result in parser {
            let quad = result.map_err(|e| ConversionError::ParseError(e.to_string()))?;
            let triple = from_oxrdf_quad(&quad)?;
            graph.add_triple(triple);
        }

        Ok(graph)
    }

    /// Parses an RDF graph from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn parse(input: &str, format: RdfFormat) -> Result<Self> {
        Self::parse_from_reader(input.as_bytes(), format)
    }
}

/// Subject/object index over an [`RdfGraph`] supporting pattern queries.
///
/// Built once per conversion; all returned references borrow from the
/// indexed graph, not from the index.
#[derive(Debug)]
pub struct GraphIndex<'a> {
    graph: &'a RdfGraph,
    by_subject: HashMap<&'a RdfNode, Vec<&'a RdfTriple>>,
    by_object: HashMap<&'a RdfNode, Vec<&'a RdfTriple>>,
}

impl<'a> GraphIndex<'a> {
    /// Indexes a graph.
    #[must_use]
    pub fn new(graph: &'a RdfGraph) -> Self {
        let mut by_subject: HashMap<&'a RdfNode, Vec<&'a RdfTriple>> = HashMap::new();
        let mut by_object: HashMap<&'a RdfNode, Vec<&'a RdfTriple>> = HashMap::new();
        for triple in graph.triples() {
            by_subject.entry(&triple.subject).or_default().push(triple);
            by_object.entry(&triple.object).or_default().push(triple);
        }
        Self {
            graph,
            by_subject,
            by_object,
        }
    }

    /// Returns the triples matching a `(subject?, predicate?, object?)` pattern
    /// in graph order.
    #[must_use]
    pub fn matching(
        &self,
        subject: Option<&RdfNode>,
        predicate: Option<&str>,
        object: Option<&RdfNode>,
    ) -> Vec<&'a RdfTriple> {
        let candidates: Vec<&'a RdfTriple> = match (subject, object) {
            (Some(s), _) => self.by_subject.get(s).cloned().unwrap_or_default(),
            (None, Some(o)) => self.by_object.get(o).cloned().unwrap_or_default(),
            (None, None) => self.graph.triples().collect(),
        };
        candidates
            .into_iter()
            .filter(|t| subject.map_or(true, |s| &t.subject == s))
            .filter(|t| predicate.map_or(true, |p| t.predicate == p))
            .filter(|t| object.map_or(true, |o| &t.object == o))
            .collect()
    }

    /// Returns the objects of `(subject, predicate, ?)`.
    #[must_use]
    pub fn objects(&self, subject: &RdfNode, predicate: &str) -> Vec<&'a RdfNode> {
        self.matching(Some(subject), Some(predicate), None)
            .into_iter()
            .map(|t| &t.object)
            .collect()
    }

    /// Returns the subjects of `(?, predicate, object)`.
    #[must_use]
    pub fn subjects(&self, predicate: &str, object: &RdfNode) -> Vec<&'a RdfNode> {
        self.matching(None, Some(predicate), Some(object))
            .into_iter()
            .map(|t| &t.subject)
            .collect()
    }

    /// Returns the `rdf:type` IRIs of a node.
    #[must_use]
    pub fn types_of(&self, node: &RdfNode) -> BTreeSet<String> {
        self.objects(node, rdf::TYPE)
            .into_iter()
            .filter_map(RdfNode::as_uri)
            .map(String::from)
            .collect()
    }

    /// Returns true if the node is the subject of at least one triple.
    #[must_use]
    pub fn describes(&self, node: &RdfNode) -> bool {
        self.by_subject.contains_key(node)
    }

    /// Returns every subject carrying all of the given types, in order of
    /// first appearance.
    #[must_use]
    pub fn subjects_with_types(&self, types: &BTreeSet<String>) -> Vec<&'a RdfNode> {
        let mut seen = HashSet::new();
        self.graph
            .triples()
            .filter(|t| t.predicate == rdf::TYPE)
            .map(|t| &t.subject)
            .filter(|s| seen.insert(*s))
            .filter(|s| types.is_subset(&self.types_of(s)))
            .collect()
    }

    /// Decodes an RDF list starting at `head`.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::MalformedInput`] if a cell lacks `rdf:first`
    /// or `rdf:rest`, or if the list loops back on itself.
    pub fn read_list(&self, head: &RdfNode) -> Result<Vec<&'a RdfNode>> {
        let mut items = Vec::new();
        let mut seen: HashSet<RdfNode> = HashSet::new();
        let mut current = head.clone();
        while current.as_uri() != Some(rdf::NIL) {
            if !seen.insert(current.clone()) {
                return Err(ConversionError::MalformedInput(format!(
                    "cyclic RDF list at {current}"
                )));
            }
            let first = self.objects(&current, rdf::FIRST);
            let item = first.first().ok_or_else(|| {
                ConversionError::MalformedInput(format!("list cell {current} has no rdf:first"))
            })?;
            items.push(*item);
            let rest = self.objects(&current, rdf::REST);
            let next = rest.first().ok_or_else(|| {
                ConversionError::MalformedInput(format!("list cell {current} has no rdf:rest"))
            })?;
            current = (*next).clone();
        }
        Ok(items)
    }
}

/// Converts our [`RdfFormat`] to oxrdfio's format.
fn to_oxrdf_format(format: RdfFormat) -> OxRdfFormat {
    match format {
        RdfFormat::RdfXml => OxRdfFormat::RdfXml,
        RdfFormat::JsonLd => OxRdfFormat::JsonLd {
            profile: JsonLdProfileSet::default(),
        },
        RdfFormat::Turtle => OxRdfFormat::Turtle,
        RdfFormat::NTriples => OxRdfFormat::NTriples,
    }
}

/// Converts an [`RdfTriple`] to an oxrdf Triple.
fn to_oxrdf_triple(triple: &RdfTriple) -> Result<Triple> {
    let subject = match &triple.subject {
        RdfNode::Uri(uri) => NamedOrBlankNode::NamedNode(
            NamedNode::new(uri)
                .map_err(|e| ConversionError::ParseError(format!("Invalid URI: {e}")))?,
        ),
        RdfNode::BlankNode(id) => NamedOrBlankNode::BlankNode(
            BlankNode::new(id)
                .map_err(|e| ConversionError::ParseError(format!("Invalid blank node ID: {e}")))?,
        ),
        RdfNode::Literal { .. } => {
            return Err(ConversionError::ParseError(
                "Literals cannot be triple subjects".into(),
            ));
        },
    };

    let predicate = NamedNode::new(&triple.predicate)
        .map_err(|e| ConversionError::ParseError(format!("Invalid predicate URI: {e}")))?;

    let object = match &triple.object {
        RdfNode::Uri(uri) => Term::NamedNode(
            NamedNode::new(uri)
                .map_err(|e| ConversionError::ParseError(format!("Invalid URI: {e}")))?,
        ),
        RdfNode::BlankNode(id) => Term::BlankNode(
            BlankNode::new(id)
                .map_err(|e| ConversionError::ParseError(format!("Invalid blank node ID: {e}")))?,
        ),
        RdfNode::Literal {
            value,
            language,
            datatype,
        } => {
            let lit = if let Some(lang) = language {
                Literal::new_language_tagged_literal(value, lang)
                    .map_err(|e| ConversionError::ParseError(format!("Invalid language tag: {e}")))?
            } else if let Some(dt) = datatype {
                let dt_node = NamedNode::new(dt)
                    .map_err(|e| {
                        ConversionError::ParseError(format!("Invalid datatype URI: {e}"))
                    })?;
                Literal::new_typed_literal(value, dt_node)
            } else {
                Literal::new_simple_literal(value)
            };
            Term::Literal(lit)
        },
    };

    Ok(Triple::new(subject, predicate, object))
}

/// Converts an oxrdf Quad back to our [`RdfTriple`].
fn from_oxrdf_quad(quad: &Quad) -> Result<RdfTriple> {
    let subject = match &quad.subject {
        NamedOrBlankNode::NamedNode(n) => RdfNode::Uri(n.as_str().to_string()),
        NamedOrBlankNode::BlankNode(b) => RdfNode::BlankNode(b.as_str().to_string()),
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ConversionError::ParseError("Unsupported subject type".into()));
        },
    };

    let predicate = quad.predicate.as_str().to_string();

    let object = match &quad.object {
        Term::NamedNode(n) => RdfNode::Uri(n.as_str().to_string()),
        Term::BlankNode(b) => RdfNode::BlankNode(b.as_str().to_string()),
        Term::Literal(lit) => {
            let value = lit.value().to_string();
            let language = lit.language().map(String::from);
            let datatype = if language.is_none() && lit.datatype() != xsd::STRING {
                Some(lit.datatype().as_str().to_string())
            } else {
                None
            };
            RdfNode::Literal {
                value,
                language,
                datatype,
            }
        },
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ConversionError::ParseError("Unsupported object type".into()));
        },
    };

    Ok(RdfTriple::new(subject, predicate, object))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_node_construction() {
        let uri = RdfNode::uri("http://example.org/foo");
        assert!(uri.is_uri());

        let blank = RdfNode::blank("b1");
        assert!(blank.is_blank());

        let lit = RdfNode::literal("hello");
        assert!(lit.is_literal());

        let lang_lit = RdfNode::literal_with_lang("hello", "en");
        assert!(lang_lit.is_literal());
    }

    #[test]
    fn test_bf_class_uri() {
        let work = RdfNode::bf_class("Work");
        assert_eq!(
            work,
            RdfNode::Uri("http://id.loc.gov/ontologies/bibframe/Work".into())
        );
    }

    #[test]
    fn test_rdf_graph_operations() {
        let mut graph = RdfGraph::new();
        assert!(graph.is_empty());

        let subj = graph.new_blank_node();
        graph.add(
            subj.clone(),
            format!("{}type", namespaces::RDF),
            RdfNode::bf_class("Work"),
        );
        graph.add(
            subj,
            format!("{}{}", namespaces::RDFS, "label"),
            RdfNode::literal("Test Work"),
        );

        assert_eq!(graph.len(), 2);
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_serialize_ntriples() {
        let mut graph = RdfGraph::new();
        let subj = RdfNode::uri("http://example.org/work1");
        graph.add(
            subj.clone(),
            format!("{}type", namespaces::RDF),
            RdfNode::bf_class("Work"),
        );
        graph.add(
            subj,
            format!("{}{}", namespaces::RDFS, "label"),
            RdfNode::literal("Test"),
        );

        let nt = graph
            .serialize(RdfFormat::NTriples)
            .expect("serialization failed");
        assert!(nt.contains("<http://example.org/work1>"));
        assert!(nt.contains("bibframe/Work"));
        assert!(nt.contains("\"Test\""));
    }

    #[test]
    fn test_roundtrip_ntriples() {
        let mut graph = RdfGraph::new();
        let subj = RdfNode::uri("http://example.org/work1");
        graph.add(
            subj,
            format!("{}type", namespaces::RDF),
            RdfNode::bf_class("Work"),
        );

        let nt = graph
            .serialize(RdfFormat::NTriples)
            .expect("serialization failed");
        let parsed = RdfGraph::parse(&nt, RdfFormat::NTriples).expect("parsing failed");

        assert_eq!(parsed.len(), graph.len());
    }

    #[test]
    fn test_list_roundtrip() {
        let mut graph = RdfGraph::new();
        let items = vec![RdfNode::literal("a"), RdfNode::literal("b"), RdfNode::literal("c")];
        let head = graph.add_list(items.clone());

        let index = graph.index();
        let decoded: Vec<RdfNode> = index
            .read_list(&head)
            .expect("well-formed list")
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_empty_list_is_nil() {
        let mut graph = RdfGraph::new();
        let head = graph.add_list(Vec::new());
        assert_eq!(head, RdfNode::uri(rdf::NIL));
        assert!(graph.is_empty());
        assert!(graph.index().read_list(&head).expect("nil").is_empty());
    }

    #[test]
    fn test_cyclic_list_is_rejected() {
        let mut graph = RdfGraph::new();
        let cell = RdfNode::blank("c1");
        graph.add(cell.clone(), rdf::FIRST, RdfNode::literal("a"));
        graph.add(cell.clone(), rdf::REST, cell.clone());

        let err = graph.index().read_list(&cell).unwrap_err();
        assert!(matches!(err, ConversionError::MalformedInput(_)));
    }

    #[test]
    fn test_list_cell_without_first_is_rejected() {
        let mut graph = RdfGraph::new();
        let cell = RdfNode::blank("c1");
        graph.add(cell.clone(), rdf::REST, RdfNode::uri(rdf::NIL));
        assert!(graph.index().read_list(&cell).is_err());
    }

    #[test]
    fn test_pattern_queries() {
        let mut graph = RdfGraph::new();
        let work = RdfNode::uri("http://example.org/work1");
        let instance = RdfNode::uri("http://example.org/instance1");
        graph.add_type(&work, format!("{}Work", namespaces::BF));
        graph.add(
            work.clone(),
            format!("{}hasInstance", namespaces::BF),
            instance.clone(),
        );
        graph.add_type(&instance, format!("{}Instance", namespaces::BF));

        let index = graph.index();
        assert_eq!(index.matching(None, None, None).len(), 3);
        assert_eq!(index.matching(Some(&work), None, None).len(), 2);
        assert_eq!(index.matching(None, Some(rdf::TYPE), None).len(), 2);
        assert_eq!(
            index.subjects(&format!("{}hasInstance", namespaces::BF), &instance),
            vec![&work]
        );
        assert!(index.describes(&instance));
        assert!(!index.describes(&RdfNode::uri("http://example.org/other")));
    }

    #[test]
    fn test_subjects_with_types_uses_and_semantics() {
        let mut graph = RdfGraph::new();
        let both = RdfNode::blank("both");
        let one = RdfNode::blank("one");
        graph.add_type(&both, "urn:a");
        graph.add_type(&both, "urn:b");
        graph.add_type(&one, "urn:a");

        let index = graph.index();
        let wanted: BTreeSet<String> = ["urn:a".to_string(), "urn:b".to_string()].into();
        assert_eq!(index.subjects_with_types(&wanted), vec![&both]);

        let only_a: BTreeSet<String> = ["urn:a".to_string()].into();
        assert_eq!(index.subjects_with_types(&only_a), vec![&both, &one]);
    }

    #[test]
    fn test_node_display() {
        assert_eq!(RdfNode::uri("urn:x").to_string(), "<urn:x>");
        assert_eq!(RdfNode::blank("b1").to_string(), "_:b1");
        assert_eq!(RdfNode::literal("v").to_string(), "\"v\"");
        assert_eq!(RdfNode::literal("v").value(), "v");
    }
}
