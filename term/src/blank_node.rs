//! Blank node like specified in [RDF](https://www.w3.org/TR/rdf11-primer/#section-blank-node).
//!
//! In Trine, a blank node is identified by its label *and* by the [`GraphId`]
//! of the graph that minted it.

use crate::{GraphId, Result, TermError};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

lazy_static! {
    /// A modified production of Turtle's BLANK_NODE_LABEL according to the
    /// [Turtle spec](https://www.w3.org/TR/turtle/#grammar-production-BlankNode).
    ///
    /// In contrast to the original rule this regular expression does not look
    /// for a leading `_:`. Accordingly it only checks if the label is valid.
    ///
    /// # Rule
    ///
    /// `BLANK_NODE_LABEL ::= (PN_CHARS_U | [0-9]) ((PN_CHARS | '.')* PN_CHARS)?`
    static ref BLANK_NODE_LABEL: Regex = Regex::new(r"(?x)
      ^
      [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_0-9]
      (
          [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_\u{2d}0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}]
          |
          \u{2e} [A-Za-z\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{2ff}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}_\u{2d}0-9\u{00B7}\u{0300}-\u{036F}\u{203F}-\u{2040}]
      )*
      $
    ").unwrap();
}

/// An RDF blank node, owned by a given graph.
///
/// Two blank nodes are equal if and only if
/// they have the same label *and* the same owning graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNode {
    id: Arc<str>,
    graph: GraphId,
}

impl BlankNode {
    /// Return a new blank node with the given label, owned by `graph`.
    ///
    /// Fails if `id` is not a valid label according to
    /// [`BLANK_NODE_LABEL`](https://www.w3.org/TR/n-triples/#grammar-production-BLANK_NODE_LABEL).
    /// This means that it must not include the leading `_:`.
    pub fn new<U: AsRef<str>>(id: U, graph: GraphId) -> Result<Self> {
        if BLANK_NODE_LABEL.is_match(id.as_ref()) {
            Ok(BlankNode {
                id: Arc::from(id.as_ref()),
                graph,
            })
        } else {
            Err(TermError::InvalidBlankNodeId(id.as_ref().to_string()))
        }
    }

    /// Return a new blank node with the given label, owned by `graph`.
    ///
    /// # Pre-condition
    ///
    /// This function requires that `id` is a valid blank node label.
    pub fn new_unchecked<U: AsRef<str>>(id: U, graph: GraphId) -> Self {
        debug_assert!(
            BLANK_NODE_LABEL.is_match(id.as_ref()),
            "invalid bnode label {:?}",
            id.as_ref()
        );
        BlankNode {
            id: Arc::from(id.as_ref()),
            graph,
        }
    }

    /// The label of this blank node, without the leading `_:`.
    pub fn label(&self) -> &str {
        &self.id
    }

    /// The graph which minted this blank node.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// A blank node with the same label, owned by another graph.
    pub fn rehome(&self, graph: GraphId) -> Self {
        BlankNode {
            id: self.id.clone(),
            graph,
        }
    }

    /// Whether `other` has the same label, regardless of the owning graph.
    pub fn same_label(&self, other: &BlankNode) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.id)
    }
}
