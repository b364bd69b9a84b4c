//! This crate is part of Trine,
//! an in-memory [RDF] core in Rust.
//!
//! I define the node model shared by all other Trine crates:
//! * [`Node`], polymorphic over [IRIs](Iri), [literals](Literal),
//!   [blank nodes](BlankNode), [variables](Variable)
//!   and [graph literals](GraphLiteral);
//! * [`Triple`], an immutable (subject, predicate, object) statement
//!   whose hash is computed once, at construction.
//!
//! Every node has a stable hash, a structural equality and a total order.
//! Blank nodes additionally carry the [`GraphId`] of the graph that minted them,
//! so that two blank nodes with the same label but different owners are never equal.
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

mod _display;
mod _error;
pub use _error::*;

pub mod blank_node;
pub mod graph_id;
pub mod graph_literal;
pub mod iri;
pub mod literal;
pub mod node;
pub mod ns;
pub mod triple;
pub mod variable;

pub use blank_node::BlankNode;
pub use graph_id::GraphId;
pub use graph_literal::GraphLiteral;
pub use iri::Iri;
pub use literal::{Literal, LiteralKind};
pub use node::{Node, NodeKind};
pub use triple::Triple;
pub use variable::Variable;
