use std::collections::{BTreeSet, HashSet};
use trine_inmem::collection::normalized;
use trine_inmem::{EagerCollection, LazyCollection, SortedCollection, TripleCollection};
use trine_term::Triple;

/// Anything that can be compared by a [`GraphMatcher`](crate::GraphMatcher):
/// a finite set of triples.
pub trait TripleSet {
    /// The distinct triples of this set, in any order.
    fn triple_vec(&self) -> Vec<Triple>;
}

impl<'a> TripleSet for dyn TripleCollection + 'a {
    fn triple_vec(&self) -> Vec<Triple> {
        self.triples()
    }
}

macro_rules! impl_triple_set_for_collection {
    ($($t:ty),*) => {
        $(
            impl TripleSet for $t {
                fn triple_vec(&self) -> Vec<Triple> {
                    self.triples()
                }
            }
        )*
    };
}

impl_triple_set_for_collection!(EagerCollection, LazyCollection, SortedCollection);

impl TripleSet for [Triple] {
    fn triple_vec(&self) -> Vec<Triple> {
        normalized(self.to_vec())
    }
}

impl TripleSet for Vec<Triple> {
    fn triple_vec(&self) -> Vec<Triple> {
        self.as_slice().triple_vec()
    }
}

impl<const N: usize> TripleSet for [Triple; N] {
    fn triple_vec(&self) -> Vec<Triple> {
        self.as_slice().triple_vec()
    }
}

impl<S: std::hash::BuildHasher> TripleSet for HashSet<Triple, S> {
    fn triple_vec(&self) -> Vec<Triple> {
        self.iter().cloned().collect()
    }
}

impl TripleSet for BTreeSet<Triple> {
    fn triple_vec(&self) -> Vec<Triple> {
        self.iter().cloned().collect()
    }
}
