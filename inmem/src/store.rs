//! The primary store of a triple collection.
//!
//! Every strategy keeps one [`TripleStore`],
//! which is the authoritative answer to [`contains`](TripleStore::contains)
//! and [`len`](TripleStore::len);
//! secondary indexes are derived from it.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use trine_term::Triple;

/// A set of triples, keyed by their cached hash, with collision buckets.
#[derive(Clone, Debug, Default)]
pub struct TripleStore {
    buckets: HashMap<u64, Vec<Triple>>,
    len: usize,
}

impl TripleStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of triples in this store.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this store is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `t`, returning `false` if an equal triple was already present.
    ///
    /// When `t` lands in a bucket already holding other triples,
    /// all of them get their [collision flag](Triple::collision) set.
    pub fn insert(&mut self, t: Triple) -> bool {
        self.insert_keyed(t.stable_hash(), t)
    }

    fn insert_keyed(&mut self, key: u64, t: Triple) -> bool {
        let bucket = self.buckets.entry(key).or_default();
        if bucket.contains(&t) {
            return false;
        }
        if !bucket.is_empty() {
            log::debug!("hash collision on {key:#x} for {t}");
            t.mark_collision();
            bucket.iter().for_each(Triple::mark_collision);
        }
        bucket.push(t);
        self.len += 1;
        true
    }

    /// Remove the triple equal to `t`, returning the stored instance if any.
    pub fn remove(&mut self, t: &Triple) -> Option<Triple> {
        let Entry::Occupied(mut e) = self.buckets.entry(t.stable_hash()) else {
            return None;
        };
        let i = e.get().iter().position(|u| u == t)?;
        let removed = e.get_mut().swap_remove(i);
        if e.get().is_empty() {
            e.remove();
        }
        self.len -= 1;
        Some(removed)
    }

    /// Whether a triple equal to `t` is stored.
    pub fn contains(&self, t: &Triple) -> bool {
        self.get(t).is_some()
    }

    /// The stored instance of the triple equal to `t`, if any.
    pub fn get(&self, t: &Triple) -> Option<&Triple> {
        self.buckets
            .get(&t.stable_hash())
            .and_then(|bucket| bucket.iter().find(|u| *u == t))
    }

    /// Iterate over all stored triples, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> + '_ {
        self.buckets.values().flatten()
    }

    /// Remove all triples.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Release unused memory.
    pub fn shrink_to_fit(&mut self) {
        self.buckets.shrink_to_fit();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use trine_term::Node;

    fn t(s: &str, p: &str, o: &str) -> Triple {
        let n = |x: &str| Node::iri_unchecked(format!("http://example.org/{x}"));
        Triple::new(n(s), n(p), n(o))
    }

    #[test]
    fn insert_is_idempotent() {
        let mut store = TripleStore::new();
        assert!(store.insert(t("a", "p", "b")));
        assert!(!store.insert(t("a", "p", "b")));
        assert_eq!(store.len(), 1);
        assert!(store.contains(&t("a", "p", "b")));
    }

    #[test]
    fn remove_returns_stored_instance() {
        let mut store = TripleStore::new();
        let stored = t("a", "p", "b");
        store.insert(stored.clone());
        assert!(store.remove(&t("x", "p", "b")).is_none());
        let removed = store.remove(&t("a", "p", "b")).unwrap();
        assert!(std::ptr::eq(removed.s(), stored.s()));
        assert!(store.is_empty());
        assert!(store.remove(&stored).is_none());
    }

    #[test]
    fn collisions_are_flagged() {
        let mut store = TripleStore::new();
        let t1 = t("a", "p", "b");
        let t2 = t("c", "p", "d");
        assert!(store.insert_keyed(42, t1.clone()));
        assert!(!t1.collision());
        assert!(store.insert_keyed(42, t2.clone()));
        assert!(t1.collision());
        assert!(t2.collision());
        assert!(!store.insert_keyed(42, t2.clone()));
        assert_eq!(store.len(), 2);
        assert_ne!(t1, t2);
    }
}
