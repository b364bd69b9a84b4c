//! The sorted strategy: sorted lists of triples, binary-searched.
//!
//! Up to three copies of the triples are kept, sorted by (S,P,O), (P,O,S) and (O,S,P).
//! Each ordering is built the first time it is needed.
//! Mutations never reorganize a list: [`delete`](TripleCollection::delete) only marks
//! the lists as not ready, and [`add`](TripleCollection::add) appends to them and
//! marks them as not ready. A query against a list which is not ready first re-sorts it
//! from the primary store, so stale content never escapes.

use crate::collection::TripleCollection;
use crate::config::IndexStrategy;
use crate::{IndexError, Result, TripleStore};
use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard, PoisonError};
use trine_term::{Node, Triple};

/// One of the three sort orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SortOrder {
    Spo = 0,
    Pos = 1,
    Osp = 2,
}

/// A lookup pattern, in (S,P,O) positions; `None` is a wildcard.
type Probe<'a> = [Option<&'a Node>; 3];

impl SortOrder {
    const ALL: [SortOrder; 3] = [SortOrder::Spo, SortOrder::Pos, SortOrder::Osp];

    /// The positions of (S,P,O) in the order they are compared.
    fn positions(self) -> [usize; 3] {
        match self {
            SortOrder::Spo => [0, 1, 2],
            SortOrder::Pos => [1, 2, 0],
            SortOrder::Osp => [2, 0, 1],
        }
    }

    fn cmp(self, t1: &Triple, t2: &Triple) -> Ordering {
        match self {
            SortOrder::Spo => t1.cmp_spo(t2),
            SortOrder::Pos => t1.cmp_pos(t2),
            SortOrder::Osp => t1.cmp_osp(t2),
        }
    }

    /// Compare `t` with `probe`, considering wildcards equal to anything.
    fn cmp_probe(self, t: &Triple, probe: &Probe) -> Ordering {
        for i in self.positions() {
            let Some(n) = probe[i] else {
                break;
            };
            match t.spo()[i].cmp(n) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// Whether the bound positions of `probe` form a prefix of this order,
    /// i.e. whether matching triples form a contiguous run in a list sorted by this order.
    fn supports(self, probe: &Probe) -> bool {
        let bound = self.positions().map(|i| probe[i].is_some());
        !bound.windows(2).any(|w| !w[0] && w[1])
    }
}

#[derive(Clone, Debug, Default)]
struct SortedList {
    /// `None` until this order is first needed.
    triples: Option<Vec<Triple>>,
    ready: bool,
}

#[derive(Clone, Debug, Default)]
struct SortedLists([SortedList; 3]);

impl SortedLists {
    fn clear(&mut self) {
        *self = SortedLists::default();
    }

    /// Make the list for `order` ready, re-sorting it from `store` if needed.
    fn ready(&mut self, order: SortOrder, store: &TripleStore) -> &[Triple] {
        let list = &mut self.0[order as usize];
        if !list.ready || list.triples.is_none() {
            log::trace!("sorting {} triples in {order:?} order", store.len());
            let mut triples: Vec<Triple> = store.iter().cloned().collect();
            triples.sort_unstable_by(|t1, t2| order.cmp(t1, t2));
            list.triples = Some(triples);
            list.ready = true;
        }
        list.triples.as_deref().unwrap_or_default()
    }

    fn any_ready(&self) -> Option<&[Triple]> {
        self.0
            .iter()
            .find(|list| list.ready)
            .and_then(|list| list.triples.as_deref())
    }
}

/// A triple collection backed by lazily (re-)sorted lists.
/// Fast to load, with a moderate memory footprint;
/// queries are logarithmic, except the first one after a mutation.
#[derive(Debug, Default)]
pub struct SortedCollection {
    store: TripleStore,
    lists: Mutex<SortedLists>,
}

impl SortedCollection {
    /// An empty collection; no sorted list is built yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many of the three sorted lists are currently ready to be searched.
    pub fn ready_orders(&self) -> usize {
        self.lock().0.iter().filter(|list| list.ready).count()
    }

    fn lock(&self) -> MutexGuard<'_, SortedLists> {
        match self.lists.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("sorted lists poisoned by a panic; discarding them");
                self.lists.clear_poison();
                let mut guard = poisoned.into_inner();
                guard.clear();
                guard
            }
        }
    }

    fn lists_mut(&mut self) -> &mut SortedLists {
        let poisoned = self.lists.is_poisoned();
        if poisoned {
            log::warn!("sorted lists poisoned by a panic; discarding them");
            self.lists.clear_poison();
        }
        let lists = self.lists.get_mut().unwrap_or_else(PoisonError::into_inner);
        if poisoned {
            lists.clear();
        }
        lists
    }

    fn search(&self, probe: Probe) -> Vec<Triple> {
        let order = SortOrder::ALL
            .into_iter()
            .find(|o| o.supports(&probe))
            .unwrap_or(SortOrder::Spo);
        debug_assert!(order.supports(&probe));
        let mut lists = self.lock();
        let list = lists.ready(order, &self.store);
        let start = list.partition_point(|t| order.cmp_probe(t, &probe) == Ordering::Less);
        list[start..]
            .iter()
            .take_while(|t| order.cmp_probe(t, &probe) == Ordering::Equal)
            .cloned()
            .collect()
    }
}

impl TripleCollection for SortedCollection {
    fn strategy(&self) -> IndexStrategy {
        IndexStrategy::Sorted
    }

    fn add(&mut self, t: Triple) -> bool {
        if !self.store.insert(t.clone()) {
            return false;
        }
        for list in self.lists_mut().0.iter_mut() {
            if let Some(triples) = &mut list.triples {
                triples.push(t.clone());
                list.ready = false;
            }
        }
        true
    }

    fn delete(&mut self, t: &Triple) -> bool {
        if self.store.remove(t).is_none() {
            return false;
        }
        for list in self.lists_mut().0.iter_mut() {
            list.ready = false;
        }
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
        let lists = self.lock();
        match lists.any_ready() {
            Some(triples) => triples.to_vec(),
            None => self.store.iter().cloned().collect(),
        }
    }

    fn with_subject(&self, s: &Node) -> Vec<Triple> {
        self.search([Some(s), None, None])
    }

    fn with_predicate(&self, p: &Node) -> Vec<Triple> {
        self.search([None, Some(p), None])
    }

    fn with_object(&self, o: &Node) -> Vec<Triple> {
        self.search([None, None, Some(o)])
    }

    fn with_subject_predicate(&self, s: &Node, p: &Node) -> Vec<Triple> {
        self.search([Some(s), Some(p), None])
    }

    fn with_predicate_object(&self, p: &Node, o: &Node) -> Vec<Triple> {
        self.search([None, Some(p), Some(o)])
    }

    fn with_subject_object(&self, s: &Node, o: &Node) -> Vec<Triple> {
        self.search([Some(s), None, Some(o)])
    }

    fn clear(&mut self) {
        self.store.clear();
        self.lists_mut().clear();
    }

    fn dispose(&mut self) {
        self.clear();
        self.store.shrink_to_fit();
    }

    fn check_consistency(&self) -> Result<()> {
        let lists = self.lock();
        for order in SortOrder::ALL {
            let list = &lists.0[order as usize];
            let Some(triples) = &list.triples else {
                continue;
            };
            if !list.ready {
                // stale lists are allowed, as long as they are never served
                continue;
            }
            let inconsistent = |detail: String| IndexError::Inconsistent {
                index: match order {
                    SortOrder::Spo => "SPO",
                    SortOrder::Pos => "POS",
                    SortOrder::Osp => "OSP",
                },
                detail,
            };
            if triples.len() != self.store.len() {
                return Err(inconsistent(format!(
                    "{} triples, expected {}",
                    triples.len(),
                    self.store.len()
                )));
            }
            if let Some(t) = triples.iter().find(|&t| !self.store.contains(t)) {
                return Err(inconsistent(format!("holds deleted {t}")));
            }
            if triples
                .windows(2)
                .any(|w| order.cmp(&w[0], &w[1]) != Ordering::Less)
            {
                return Err(inconsistent("not strictly sorted".to_string()));
            }
        }
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
    fn orders_are_built_on_first_use() {
        let mut c = SortedCollection::new();
        c.add(t("a", "p", "b"));
        assert_eq!(c.ready_orders(), 0);
        c.with_subject(&n("a"));
        assert_eq!(c.ready_orders(), 1);
        c.with_object(&n("b"));
        c.with_predicate(&n("p"));
        assert_eq!(c.ready_orders(), 3);
        c.with_subject_object(&n("a"), &n("b"));
        assert_eq!(c.ready_orders(), 3);
        c.check_consistency().unwrap();
    }

    #[test]
    fn mutations_mark_lists_not_ready() {
        let mut c = SortedCollection::new();
        c.add(t("a", "p", "b"));
        c.with_subject(&n("a"));
        c.add(t("a", "p", "c"));
        assert_eq!(c.ready_orders(), 0);
        assert_eq!(c.with_subject(&n("a")).len(), 2);
        assert_eq!(c.ready_orders(), 1);
        c.delete(&t("a", "p", "b"));
        assert_eq!(c.ready_orders(), 0);
        assert_eq!(c.with_subject(&n("a")), vec![t("a", "p", "c")]);
    }

    #[test]
    fn delete_then_enumerate_never_shows_deleted() {
        let mut c = SortedCollection::new();
        c.add(t("a", "p", "b"));
        c.add(t("c", "p", "d"));
        c.with_subject(&n("a"));
        assert!(c.delete(&t("a", "p", "b")));
        assert_eq!(c.triples(), vec![t("c", "p", "d")]);
        c.with_predicate(&n("p"));
        assert_eq!(c.triples(), vec![t("c", "p", "d")]);
        c.check_consistency().unwrap();
    }

    #[test]
    fn runs_are_contiguous() {
        let mut c = SortedCollection::new();
        for s in ["a", "b", "c"] {
            for p in ["p", "q"] {
                for o in ["x", "y"] {
                    c.add(t(s, p, o));
                }
            }
        }
        assert_eq!(c.with_subject(&n("b")).len(), 4);
        assert_eq!(c.with_subject_predicate(&n("b"), &n("q")).len(), 2);
        assert_eq!(c.with_predicate_object(&n("q"), &n("y")).len(), 3);
        assert_eq!(c.with_subject_object(&n("c"), &n("x")).len(), 2);
        assert!(c.with_subject(&n("z")).is_empty());
        assert!(c.with_subject_predicate(&n("a"), &n("z")).is_empty());
    }

    #[test]
    fn probe_support() {
        let a = n("a");
        assert!(SortOrder::Spo.supports(&[Some(&a), Some(&a), None]));
        assert!(!SortOrder::Spo.supports(&[Some(&a), None, Some(&a)]));
        assert!(SortOrder::Osp.supports(&[Some(&a), None, Some(&a)]));
        assert!(SortOrder::Pos.supports(&[None, Some(&a), Some(&a)]));
    }
}
