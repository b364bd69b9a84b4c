//! The lazy indexing strategy: keys are indexed on demand.
//!
//! Indexes start empty. The first query for a given key inserts an explicit
//! empty entry for that key, then scans the whole primary store to fill it.
//! Mutations only update entries for keys which have already been queried,
//! so the indexes double as a cache of query results.
//!
//! Entries are never evicted implicitly:
//! the cache grows with the number of distinct keys ever queried,
//! until [`LazyCollection::clear_cache`] is called.

use crate::collection::TripleCollection;
use crate::config::IndexStrategy;
use crate::index::{check_index, IndexMap, PairKey};
use crate::{IndexError, Result, TripleStore};
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use trine_term::{Node, Triple};

/// A triple collection indexing keys when they are first queried.
/// Fast to load, slow on the first query for each key,
/// fast on subsequent queries for the same key.
#[derive(Debug, Default)]
pub struct LazyCollection {
    store: TripleStore,
    cache: Mutex<LazyIndexes>,
}

#[derive(Debug, Default)]
struct LazyIndexes {
    s: IndexMap<Node>,
    p: IndexMap<Node>,
    o: IndexMap<Node>,
    sp: IndexMap<PairKey>,
    po: IndexMap<PairKey>,
    so: IndexMap<PairKey>,
}

impl LazyIndexes {
    fn clear(&mut self) {
        self.s.clear();
        self.p.clear();
        self.o.clear();
        self.sp.clear();
        self.po.clear();
        self.so.clear();
    }

    fn key_count(&self) -> usize {
        self.s.key_count()
            + self.p.key_count()
            + self.o.key_count()
            + self.sp.key_count()
            + self.po.key_count()
            + self.so.key_count()
    }
}

/// Return the triples selected by `key`, scanning `store` if `key` was never indexed.
fn lookup<K, F>(index: &mut IndexMap<K>, key: K, store: &TripleStore, matches: F) -> Vec<Triple>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    F: Fn(&Triple) -> bool,
{
    if let Some(triples) = index.get(&key) {
        return triples.to_vec();
    }
    log::trace!("lazy index miss for {key:?}, scanning {} triples", store.len());
    index.insert_marker(key.clone());
    index
        .populate(key, store.iter().filter(|&t| matches(t)).cloned())
        .to_vec()
}

fn pair(n1: &Node, n2: &Node) -> PairKey {
    (n1.clone(), n2.clone())
}

impl LazyCollection {
    /// An empty collection, with empty indexes.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys currently cached, across all six indexes
    /// (including keys selecting no triple).
    pub fn cached_keys(&self) -> usize {
        self.lock().key_count()
    }

    /// Evict every cached key; subsequent queries will scan the store again.
    pub fn clear_cache(&mut self) {
        self.cache_mut().clear();
    }

    fn lock(&self) -> MutexGuard<'_, LazyIndexes> {
        match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("lazy index cache poisoned by a panic; discarding it");
                self.cache.clear_poison();
                let mut guard = poisoned.into_inner();
                guard.clear();
                guard
            }
        }
    }

    fn cache_mut(&mut self) -> &mut LazyIndexes {
        let poisoned = self.cache.is_poisoned();
        if poisoned {
            log::warn!("lazy index cache poisoned by a panic; discarding it");
            self.cache.clear_poison();
        }
        let cache = self.cache.get_mut().unwrap_or_else(PoisonError::into_inner);
        if poisoned {
            cache.clear();
        }
        cache
    }
}

impl TripleCollection for LazyCollection {
    fn strategy(&self) -> IndexStrategy {
        IndexStrategy::Lazy
    }

    fn add(&mut self, t: Triple) -> bool {
        if !self.store.insert(t.clone()) {
            return false;
        }
        let cache = self.cache_mut();
        cache.s.push_if_indexed(t.s(), t.clone());
        cache.p.push_if_indexed(t.p(), t.clone());
        cache.o.push_if_indexed(t.o(), t.clone());
        cache.sp.push_if_indexed(&pair(t.s(), t.p()), t.clone());
        cache.po.push_if_indexed(&pair(t.p(), t.o()), t.clone());
        cache.so.push_if_indexed(&pair(t.s(), t.o()), t);
        true
    }

    fn delete(&mut self, t: &Triple) -> bool {
        let Some(t) = self.store.remove(t) else {
            return false;
        };
        let cache = self.cache_mut();
        cache.s.remove_one_val(t.s(), &t, false);
        cache.p.remove_one_val(t.p(), &t, false);
        cache.o.remove_one_val(t.o(), &t, false);
        cache.sp.remove_one_val(&pair(t.s(), t.p()), &t, false);
        cache.po.remove_one_val(&pair(t.p(), t.o()), &t, false);
        cache.so.remove_one_val(&pair(t.s(), t.o()), &t, false);
        true
    }

    fn contains(&self, t: &Triple) -> bool {
        self.store.contains(t)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn get(&self, t: &Triple) -> Result<Triple> {
        self.store
            .get(t)
            .cloned()
            .ok_or_else(|| IndexError::NotFound(t.to_string()))
    }

    fn triples(&self) -> Vec<Triple> {
        self.store.iter().cloned().collect()
    }

    fn with_subject(&self, s: &Node) -> Vec<Triple> {
        let mut cache = self.lock();
        lookup(&mut cache.s, s.clone(), &self.store, |t| t.s() == s)
    }

    fn with_predicate(&self, p: &Node) -> Vec<Triple> {
        let mut cache = self.lock();
        lookup(&mut cache.p, p.clone(), &self.store, |t| t.p() == p)
    }

    fn with_object(&self, o: &Node) -> Vec<Triple> {
        let mut cache = self.lock();
        lookup(&mut cache.o, o.clone(), &self.store, |t| t.o() == o)
    }

    fn with_subject_predicate(&self, s: &Node, p: &Node) -> Vec<Triple> {
        let mut cache = self.lock();
        lookup(&mut cache.sp, pair(s, p), &self.store, |t| {
            t.s() == s && t.p() == p
        })
    }

    fn with_predicate_object(&self, p: &Node, o: &Node) -> Vec<Triple> {
        let mut cache = self.lock();
        lookup(&mut cache.po, pair(p, o), &self.store, |t| {
            t.p() == p && t.o() == o
        })
    }

    fn with_subject_object(&self, s: &Node, o: &Node) -> Vec<Triple> {
        let mut cache = self.lock();
        lookup(&mut cache.so, pair(s, o), &self.store, |t| {
            t.s() == s && t.o() == o
        })
    }

    fn clear(&mut self) {
        self.store.clear();
        self.cache_mut().clear();
    }

    fn dispose(&mut self) {
        self.clear();
        self.store.shrink_to_fit();
        *self.cache_mut() = LazyIndexes::default();
    }

    fn check_consistency(&self) -> Result<()> {
        let cache = self.lock();
        check_index("S", &cache.s, &self.store, |t| t.s().clone(), false)?;
        check_index("P", &cache.p, &self.store, |t| t.p().clone(), false)?;
        check_index("O", &cache.o, &self.store, |t| t.o().clone(), false)?;
        check_index("SP", &cache.sp, &self.store, |t| pair(t.s(), t.p()), false)?;
        check_index("PO", &cache.po, &self.store, |t| pair(t.p(), t.o()), false)?;
        check_index("SO", &cache.so, &self.store, |t| pair(t.s(), t.o()), false)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn n(x: &str) -> Node {
        Node::iri_unchecked(format!("http://example.org/{x}"))
    }

    fn t(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(n(s), n(p), n(o))
    }

    #[test]
    fn indexes_start_empty() {
        let mut c = LazyCollection::new();
        c.add(t("a", "p", "b"));
        assert_eq!(c.cached_keys(), 0);
        assert_eq!(c.with_subject(&n("a")).len(), 1);
        assert_eq!(c.cached_keys(), 1);
    }

    #[test]
    fn empty_marker_is_cached_then_updated() {
        let mut c = LazyCollection::new();
        c.add(t("a", "p", "b"));
        assert!(c.with_subject(&n("x")).is_empty());
        assert_eq!(c.cached_keys(), 1);

        c.add(t("x", "p", "b"));
        assert_eq!(c.with_subject(&n("x")), vec![t("x", "p", "b")]);
        assert_eq!(c.cached_keys(), 1);
        c.check_consistency().unwrap();
    }

    #[test]
    fn add_does_not_index_new_keys() {
        let mut c = LazyCollection::new();
        c.add(t("a", "p", "b"));
        c.add(t("c", "q", "d"));
        assert_eq!(c.cached_keys(), 0);
    }

    #[test]
    fn delete_keeps_marker() {
        let mut c = LazyCollection::new();
        c.add(t("a", "p", "b"));
        assert_eq!(c.with_predicate_object(&n("p"), &n("b")).len(), 1);
        assert!(c.delete(&t("a", "p", "b")));
        assert_eq!(c.cached_keys(), 1);
        assert!(c.with_predicate_object(&n("p"), &n("b")).is_empty());
        c.check_consistency().unwrap();
    }

    #[test]
    fn clear_cache_forgets_keys() {
        let mut c = LazyCollection::new();
        c.add(t("a", "p", "b"));
        c.with_subject(&n("a"));
        c.with_object(&n("b"));
        assert_eq!(c.cached_keys(), 2);
        c.clear_cache();
        assert_eq!(c.cached_keys(), 0);
        assert_eq!(c.with_object(&n("b")).len(), 1);
    }
}
