//! An [`IndexMap`] associates keys (nodes or pairs of nodes) with the triples they select.
//!
//! It distinguishes three states for a key:
//! * absent: the key was never indexed (or queried);
//! * present but empty: the key was indexed, and selects no triple;
//! * present with triples.
//!
//! The second state is what allows [`LazyCollection`](crate::LazyCollection)
//! to use its indexes as a query cache.

use crate::{IndexError, Result, TripleStore};
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use trine_term::{Node, Triple};

/// Key of the combined indexes (SP, PO, SO).
pub type PairKey = (Node, Node);

/// A multi-valued map from keys to triples.
#[derive(Clone, Debug)]
pub struct IndexMap<K> {
    map: HashMap<K, Vec<Triple>>,
    total: usize,
}

impl<K> Default for IndexMap<K> {
    fn default() -> Self {
        IndexMap {
            map: HashMap::new(),
            total: 0,
        }
    }
}

impl<K: Hash + Eq> IndexMap<K> {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The triples selected by `key`,
    /// or `None` if `key` was never indexed.
    pub fn get<Q>(&self, key: &Q) -> Option<&[Triple]>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).map(Vec::as_slice)
    }

    /// Whether `key` was indexed (possibly with no triple).
    pub fn is_indexed<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Record that `key` selects no triple, unless it is already indexed.
    pub fn insert_marker(&mut self, key: K) {
        self.map.entry(key).or_default();
    }

    /// Add `t` to the triples selected by `key`, creating the entry if needed.
    pub fn push(&mut self, key: K, t: Triple) {
        self.map.entry(key).or_default().push(t);
        self.total += 1;
    }

    /// Add `t` to the triples selected by `key`, only if `key` is already indexed.
    ///
    /// Return whether `t` was added.
    pub fn push_if_indexed<Q>(&mut self, key: &Q, t: Triple) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.map.get_mut(key) {
            Some(triples) => {
                triples.push(t);
                self.total += 1;
                true
            }
            None => false,
        }
    }

    /// Index `key` with the given triples (replacing any previous entry).
    pub fn populate<I>(&mut self, key: K, triples: I) -> &[Triple]
    where
        I: IntoIterator<Item = Triple>,
    {
        let entry = self.map.entry(key).or_default();
        self.total -= entry.len();
        entry.clear();
        entry.extend(triples);
        self.total += entry.len();
        entry
    }

    /// Remove `t` from the triples selected by `key`.
    ///
    /// If `drop_empty` is true, an entry left empty is removed altogether;
    /// otherwise it is kept as an explicit "no match" marker.
    pub fn remove_one_val<Q>(&mut self, key: &Q, t: &Triple, drop_empty: bool) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(triples) = self.map.get_mut(key) else {
            return false;
        };
        let Some(i) = triples.iter().position(|u| u == t) else {
            return false;
        };
        triples.swap_remove(i);
        self.total -= 1;
        if drop_empty && triples.is_empty() {
            self.map.remove(key);
        }
        true
    }

    /// Iterate over the indexed keys (including those selecting no triple).
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.keys()
    }

    /// Iterate over the indexed keys and the triples they select.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Triple])> + '_ {
        self.map.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// The number of indexed keys.
    pub fn key_count(&self) -> usize {
        self.map.len()
    }

    /// The total number of (key, triple) associations.
    pub fn triple_count(&self) -> usize {
        self.total
    }

    /// Forget every key.
    pub fn clear(&mut self) {
        self.map.clear();
        self.total = 0;
    }

    /// Release unused memory.
    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit();
    }
}

/// Check that every entry of `index` holds exactly the stored triples selected by its key.
///
/// If `complete` is true, every key selecting a stored triple must also be indexed,
/// and no entry may be empty.
pub(crate) fn check_index<K, F>(
    name: &'static str,
    index: &IndexMap<K>,
    store: &TripleStore,
    key_of: F,
    complete: bool,
) -> Result<()>
where
    K: Hash + Eq + std::fmt::Debug,
    F: Fn(&Triple) -> K,
{
    let mut expected: HashMap<K, usize> = HashMap::new();
    for t in store.iter() {
        *expected.entry(key_of(t)).or_default() += 1;
    }
    let inconsistent = |detail: String| IndexError::Inconsistent {
        index: name,
        detail,
    };
    for (key, triples) in index.iter() {
        let count = expected.get(key).copied().unwrap_or(0);
        if triples.len() != count {
            return Err(inconsistent(format!(
                "{key:?} has {} triples, expected {count}",
                triples.len()
            )));
        }
        let distinct: HashSet<&Triple> = triples.iter().collect();
        if distinct.len() != triples.len() {
            return Err(inconsistent(format!("{key:?} has duplicate triples")));
        }
        if let Some(t) = triples.iter().find(|&t| !store.contains(t) || key_of(t) != *key) {
            return Err(inconsistent(format!("{key:?} holds unexpected {t}")));
        }
        if complete && triples.is_empty() {
            return Err(inconsistent(format!("{key:?} is empty")));
        }
    }
    if complete && index.key_count() != expected.len() {
        return Err(inconsistent(format!(
            "{} keys indexed, expected {}",
            index.key_count(),
            expected.len()
        )));
    }
    Ok(())
}
