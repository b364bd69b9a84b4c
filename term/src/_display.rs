// Implement the Display trait for Node, using the N-Triples syntax
// (extended with `?var` for variables and `{ ... }` for graph literals).

use std::fmt;

use crate::Node;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Iri(iri) => fmt::Display::fmt(iri, f),
            Node::Literal(lit) => fmt::Display::fmt(lit, f),
            Node::Blank(bn) => fmt::Display::fmt(bn, f),
            Node::Variable(var) => fmt::Display::fmt(var, f),
            Node::GraphLiteral(gl) => fmt::Display::fmt(gl, f),
        }
    }
}
