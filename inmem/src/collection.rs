//! I define the [`TripleCollection`] contract, shared by all indexing strategies.

use crate::config::IndexStrategy;
use crate::Result;
use std::collections::BTreeSet;
use std::fmt::Debug;
use trine_term::{Node, Triple};

/// The set of triples owned by one graph.
///
/// All implementations must behave identically as observed through this trait:
/// no query may ever return a triple which is not currently stored,
/// nor omit one which is.
/// Pattern queries never fail; they return an empty vector when nothing matches.
/// The order of returned triples is unspecified.
///
/// Implementations follow a single-writer discipline:
/// mutation requires `&mut self`,
/// while queries only need `&self` (caches use interior mutability).
pub trait TripleCollection: Debug + Send + Sync {
    /// The indexing strategy of this collection.
    fn strategy(&self) -> IndexStrategy;

    /// Insert `t`; return `false` (and do nothing) if it was already present.
    fn add(&mut self, t: Triple) -> bool;

    /// Remove `t`; return `false` (and do nothing) if it was absent.
    fn delete(&mut self, t: &Triple) -> bool;

    /// Whether `t` is present.
    fn contains(&self, t: &Triple) -> bool;

    /// The number of triples.
    fn len(&self) -> usize;

    /// Whether this collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored instance of the triple equal to `t`.
    ///
    /// # Error
    /// [`IndexError::NotFound`](crate::IndexError::NotFound) if no such triple is stored.
    fn get(&self, t: &Triple) -> Result<Triple>;

    /// All the triples of this collection.
    fn triples(&self) -> Vec<Triple>;

    /// The triples with subject `s`.
    fn with_subject(&self, s: &Node) -> Vec<Triple>;

    /// The triples with predicate `p`.
    fn with_predicate(&self, p: &Node) -> Vec<Triple>;

    /// The triples with object `o`.
    fn with_object(&self, o: &Node) -> Vec<Triple>;

    /// The triples with subject `s` and predicate `p`.
    fn with_subject_predicate(&self, s: &Node, p: &Node) -> Vec<Triple>;

    /// The triples with predicate `p` and object `o`.
    fn with_predicate_object(&self, p: &Node, o: &Node) -> Vec<Triple>;

    /// The triples with subject `s` and object `o`.
    fn with_subject_object(&self, s: &Node, o: &Node) -> Vec<Triple>;

    /// The distinct subjects of this collection.
    fn subject_nodes(&self) -> BTreeSet<Node> {
        self.triples().iter().map(|t| t.s().clone()).collect()
    }

    /// The distinct predicates of this collection.
    fn predicate_nodes(&self) -> BTreeSet<Node> {
        self.triples().iter().map(|t| t.p().clone()).collect()
    }

    /// The distinct objects of this collection.
    fn object_nodes(&self) -> BTreeSet<Node> {
        self.triples().iter().map(|t| t.o().clone()).collect()
    }

    /// The triples matching the given pattern, where `None` matches any node.
    fn triples_matching(&self, s: Option<&Node>, p: Option<&Node>, o: Option<&Node>) -> Vec<Triple> {
        match (s, p, o) {
            (Some(s), Some(p), Some(o)) => {
                let probe = Triple::new(s.clone(), p.clone(), o.clone());
                self.get(&probe).into_iter().collect()
            }
            (Some(s), Some(p), None) => self.with_subject_predicate(s, p),
            (None, Some(p), Some(o)) => self.with_predicate_object(p, o),
            (Some(s), None, Some(o)) => self.with_subject_object(s, o),
            (Some(s), None, None) => self.with_subject(s),
            (None, Some(p), None) => self.with_predicate(p),
            (None, None, Some(o)) => self.with_object(o),
            (None, None, None) => self.triples(),
        }
    }

    /// Remove all triples, and reset all indexes.
    fn clear(&mut self);

    /// Release all resources held by this collection.
    ///
    /// The collection is left empty, and can still be used afterwards.
    fn dispose(&mut self) {
        self.clear();
    }

    /// Check that every secondary structure agrees with the primary store.
    ///
    /// This is meant for tests and debug builds; it may be costly.
    fn check_consistency(&self) -> Result<()>;
}

/// Convenience methods for [`TripleCollection`]s,
/// selecting triples with plain closures.
pub trait TripleCollectionExt: TripleCollection {
    /// The triples for which `predicate` holds.
    fn triples_where<F>(&self, predicate: F) -> Vec<Triple>
    where
        F: FnMut(&Triple) -> bool,
    {
        let mut predicate = predicate;
        self.triples().into_iter().filter(|t| predicate(t)).collect()
    }

    /// The triples with subject `s` for which `predicate` holds.
    fn with_subject_where<F>(&self, s: &Node, predicate: F) -> Vec<Triple>
    where
        F: FnMut(&Triple) -> bool,
    {
        let mut predicate = predicate;
        self.with_subject(s).into_iter().filter(|t| predicate(t)).collect()
    }

    /// Whether any triple satisfies `predicate`.
    fn any_triple<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Triple) -> bool,
    {
        self.triples().iter().any(predicate)
    }
}

impl<T: TripleCollection + ?Sized> TripleCollectionExt for T {}

/// Sort and de-duplicate query results, so that they can be compared across strategies.
pub fn normalized(mut triples: Vec<Triple>) -> Vec<Triple> {
    triples.sort();
    triples.dedup();
    triples
}
