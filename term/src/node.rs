//! I define [`Node`], the polymorphic RDF term stored in [triples](crate::Triple).

use crate::{BlankNode, GraphId, GraphLiteral, Iri, Literal, Result, Variable};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// The different kinds of nodes that a [`Node`] can represent.
///
/// The order of the variants is the first criterion of the total order on [`Node`]s.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub enum NodeKind {
    /// An [RDF IRI](https://www.w3.org/TR/rdf11-concepts/#section-IRIs)
    Iri,
    /// An RDF [literal](https://www.w3.org/TR/rdf11-concepts/#section-Graph-Literal)
    Literal,
    /// An RDF [blank node](https://www.w3.org/TR/rdf11-concepts/#section-blank-nodes)
    Blank,
    /// A SPARQL or Notation3 variable
    Variable,
    /// A Notation3 formula
    GraphLiteral,
}

/// A generalized RDF node.
///
/// Equality and hashing are structural;
/// the derived order sorts nodes by [`NodeKind`] first, then by content.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    /// An IRI
    Iri(Iri),
    /// A literal
    Literal(Literal),
    /// A blank node
    Blank(BlankNode),
    /// A variable
    Variable(Variable),
    /// A graph literal
    GraphLiteral(GraphLiteral),
}

impl Node {
    /// Build an IRI node, checking the IRI.
    pub fn iri<U: AsRef<str>>(iri: U) -> Result<Self> {
        Iri::new(iri).map(Node::Iri)
    }

    /// Build an IRI node without checking the IRI.
    pub fn iri_unchecked<U: AsRef<str>>(iri: U) -> Self {
        Node::Iri(Iri::new_unchecked(iri))
    }

    /// Build an `xsd:string` literal node.
    pub fn literal<U: AsRef<str>>(lexical: U) -> Self {
        Node::Literal(Literal::new_simple(lexical))
    }

    /// Build a typed literal node.
    pub fn typed_literal<U: AsRef<str>>(lexical: U, datatype: Iri) -> Self {
        Node::Literal(Literal::new_dt(lexical, datatype))
    }

    /// Build a language-tagged literal node.
    pub fn lang_literal<U: AsRef<str>, V: AsRef<str>>(lexical: U, lang: V) -> Result<Self> {
        Literal::new_lang(lexical, lang).map(Node::Literal)
    }

    /// Build a blank node owned by `graph`, checking its label.
    pub fn blank<U: AsRef<str>>(label: U, graph: GraphId) -> Result<Self> {
        BlankNode::new(label, graph).map(Node::Blank)
    }

    /// Build a blank node owned by `graph` without checking its label.
    pub fn blank_unchecked<U: AsRef<str>>(label: U, graph: GraphId) -> Self {
        Node::Blank(BlankNode::new_unchecked(label, graph))
    }

    /// Build a variable node, checking its name.
    pub fn variable<U: AsRef<str>>(name: U) -> Result<Self> {
        Variable::new(name).map(Node::Variable)
    }

    /// The kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Iri(_) => NodeKind::Iri,
            Node::Literal(_) => NodeKind::Literal,
            Node::Blank(_) => NodeKind::Blank,
            Node::Variable(_) => NodeKind::Variable,
            Node::GraphLiteral(_) => NodeKind::GraphLiteral,
        }
    }

    /// Whether this node is an IRI.
    #[inline]
    pub fn is_iri(&self) -> bool {
        matches!(self, Node::Iri(_))
    }

    /// Whether this node is a literal.
    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Literal(_))
    }

    /// Whether this node is a blank node.
    #[inline]
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Blank(_))
    }

    /// Whether this node is a variable.
    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, Node::Variable(_))
    }

    /// The blank node wrapped by this node, if any.
    pub fn as_blank(&self) -> Option<&BlankNode> {
        match self {
            Node::Blank(b) => Some(b),
            _ => None,
        }
    }

    /// A hash of this node which only depends on its value,
    /// and is therefore stable across runs of the same build.
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl From<Iri> for Node {
    fn from(other: Iri) -> Self {
        Node::Iri(other)
    }
}

impl From<Literal> for Node {
    fn from(other: Literal) -> Self {
        Node::Literal(other)
    }
}

impl From<BlankNode> for Node {
    fn from(other: BlankNode) -> Self {
        Node::Blank(other)
    }
}

impl From<Variable> for Node {
    fn from(other: Variable) -> Self {
        Node::Variable(other)
    }
}

impl From<GraphLiteral> for Node {
    fn from(other: GraphLiteral) -> Self {
        Node::GraphLiteral(other)
    }
}
