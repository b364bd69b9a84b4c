//! This crate is part of Trine,
//! an in-memory [RDF] core in Rust.
//!
//! It decides whether two sets of triples are the same graph
//! up to a relabeling of their blank nodes ([isomorphism]),
//! or whether one of them can be embedded in the other (sub-graph matching).
//! On success, the blank node mapping witnessing the answer is returned.
//!
//! Cheap, deterministic rules are tried first
//! (ground triple elimination, degree classification, identical labels,
//! uniquely determined partners);
//! a backtracking search is only used when they are not conclusive.
//! That search is exponential in the worst case,
//! so it can be bounded with [`MatchOptions`].
//!
//! Triples with a blank node in all three positions are not supported,
//! and cause [`MatchError::UnsupportedGraphShape`].
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
//! [isomorphism]: https://www.w3.org/TR/rdf11-concepts/#graph-isomorphism
#![deny(missing_docs)]

mod _error;
pub use _error::*;

mod mapping;
mod matcher;
mod options;
mod source;

pub use mapping::BnodeMapping;
pub use matcher::GraphMatcher;
pub use options::{MatchMode, MatchOptions};
pub use source::TripleSet;

/// Computes whether two triple sets are isomorphic, with the default [`MatchOptions`].
///
/// # Error
/// [`MatchError::UnsupportedGraphShape`] if either set contains a triple
/// made only of blank nodes.
pub fn isomorphic_graphs<A, B>(a: &A, b: &B) -> Result<bool>
where
    A: TripleSet + ?Sized,
    B: TripleSet + ?Sized,
{
    Ok(GraphMatcher::default().equals(a, b)?.0)
}

/// Computes whether every triple of `a` can be found in `b`, up to blank node relabeling,
/// with the default [`MatchOptions`].
///
/// # Error
/// [`MatchError::UnsupportedGraphShape`] if either set contains a triple
/// made only of blank nodes.
pub fn is_subgraph<A, B>(a: &A, b: &B) -> Result<bool>
where
    A: TripleSet + ?Sized,
    B: TripleSet + ?Sized,
{
    Ok(GraphMatcher::default().is_subgraph_of(a, b)?.0)
}


#[cfg(test)]
fn test_setup() {
    TEST_SETUP.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[cfg(test)]
static TEST_SETUP: std::sync::Once = std::sync::Once::new();
