//! Trine is an in-memory [RDF] core in Rust.
//!
//! A [`Graph`] owns a set of [triples](term::Triple),
//! stored in a [collection](inmem) whose indexing strategy is chosen when the graph is built.
//! Two graphs can be compared up to the renaming of their blank nodes,
//! either for equality or for inclusion (see [`isomorphism`]).
//!
//! # Getting Started
//!
//! ```
//! use trine::Graph;
//! use trine::inmem::{CollectionConfig, IndexStrategy};
//! use trine::term::Node;
//!
//! let knows = Node::iri("http://xmlns.com/foaf/0.1/knows")?;
//! let alice = Node::iri("http://example.org/alice")?;
//!
//! let mut g1 = Graph::new();
//! let b = g1.new_blank_node();
//! g1.assert(alice.clone(), knows.clone(), b);
//!
//! let mut g2 = Graph::with_config(CollectionConfig::new(IndexStrategy::Lazy));
//! let b = g2.blank_node("someone")?;
//! g2.assert(alice.clone(), knows.clone(), b);
//!
//! assert_eq!(g1.with_subject(&alice).len(), 1);
//! let (equal, mapping) = g1.equals(&g2)?;
//! assert!(equal);
//! assert_eq!(mapping.unwrap().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

pub use trine_inmem as inmem;
pub use trine_isomorphism as isomorphism;
pub use trine_term as term;

mod graph;
pub use graph::{Graph, AUTO_LABEL_PREFIX};


#[cfg(test)]
fn test_setup() {
    TEST_SETUP.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[cfg(test)]
static TEST_SETUP: std::sync::Once = std::sync::Once::new();
