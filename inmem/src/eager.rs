//! The eager indexing strategy: every index is maintained on every mutation.
//!
//! This optimizes query latency at the cost of insertion latency and memory.

use crate::collection::TripleCollection;
use crate::config::IndexStrategy;
use crate::index::{check_index, IndexMap, PairKey};
use crate::{IndexError, Result, TripleStore};
use std::collections::BTreeSet;
use trine_term::{Node, Triple};

/// A heavily indexed triple collection.
/// Fast to query but slow to load, with a relatively high memory footprint.
///
/// It always maintains a subject, a predicate and an object index.
/// If built with `full_index`, it also maintains the combined
/// subject-predicate, predicate-object and subject-object indexes;
/// otherwise, two-node queries filter the results of a one-node index.
#[derive(Clone, Debug)]
pub struct EagerCollection {
    store: TripleStore,
    s: IndexMap<Node>,
    p: IndexMap<Node>,
    o: IndexMap<Node>,
    combined: Option<CombinedIndexes>,
}

#[derive(Clone, Debug, Default)]
struct CombinedIndexes {
    sp: IndexMap<PairKey>,
    po: IndexMap<PairKey>,
    so: IndexMap<PairKey>,
}

impl EagerCollection {
    /// An empty collection; `full_index` enables the combined indexes,
    /// and can not be changed afterwards.
    pub fn new(full_index: bool) -> Self {
        EagerCollection {
            store: TripleStore::new(),
            s: IndexMap::new(),
            p: IndexMap::new(),
            o: IndexMap::new(),
            combined: full_index.then(CombinedIndexes::default),
        }
    }

    /// Whether the combined indexes are maintained.
    pub fn is_fully_indexed(&self) -> bool {
        self.combined.is_some()
    }

    fn debug_check(&self) {
        debug_assert_eq!(self.s.triple_count(), self.store.len());
        debug_assert_eq!(self.p.triple_count(), self.store.len());
        debug_assert_eq!(self.o.triple_count(), self.store.len());
        if let Some(c) = &self.combined {
            debug_assert_eq!(c.sp.triple_count(), self.store.len());
            debug_assert_eq!(c.po.triple_count(), self.store.len());
            debug_assert_eq!(c.so.triple_count(), self.store.len());
        }
    }
}

impl Default for EagerCollection {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FULL_INDEX)
    }
}

fn filtered<F>(triples: Option<&[Triple]>, mut predicate: F) -> Vec<Triple>
where
    F: FnMut(&Triple) -> bool,
{
    triples
        .unwrap_or_default()
        .iter()
        .filter(|&t| predicate(t))
        .cloned()
        .collect()
}

fn pair(n1: &Node, n2: &Node) -> PairKey {
    (n1.clone(), n2.clone())
}

impl TripleCollection for EagerCollection {
    fn strategy(&self) -> IndexStrategy {
        IndexStrategy::Eager
    }

    fn add(&mut self, t: Triple) -> bool {
        if !self.store.insert(t.clone()) {
            return false;
        }
        self.s.push(t.s().clone(), t.clone());
        self.p.push(t.p().clone(), t.clone());
        self.o.push(t.o().clone(), t.clone());
        if let Some(c) = &mut self.combined {
            c.sp.push(pair(t.s(), t.p()), t.clone());
            c.po.push(pair(t.p(), t.o()), t.clone());
            c.so.push(pair(t.s(), t.o()), t);
        }
        self.debug_check();
        true
    }

    fn delete(&mut self, t: &Triple) -> bool {
        let Some(t) = self.store.remove(t) else {
            return false;
        };
        self.s.remove_one_val(t.s(), &t, true);
        self.p.remove_one_val(t.p(), &t, true);
        self.o.remove_one_val(t.o(), &t, true);
        if let Some(c) = &mut self.combined {
            c.sp.remove_one_val(&pair(t.s(), t.p()), &t, true);
            c.po.remove_one_val(&pair(t.p(), t.o()), &t, true);
            c.so.remove_one_val(&pair(t.s(), t.o()), &t, true);
        }
        self.debug_check();
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
        self.s.get(s).map(<[Triple]>::to_vec).unwrap_or_default()
    }

    fn with_predicate(&self, p: &Node) -> Vec<Triple> {
        self.p.get(p).map(<[Triple]>::to_vec).unwrap_or_default()
    }

    fn with_object(&self, o: &Node) -> Vec<Triple> {
        self.o.get(o).map(<[Triple]>::to_vec).unwrap_or_default()
    }

    fn with_subject_predicate(&self, s: &Node, p: &Node) -> Vec<Triple> {
        match &self.combined {
            Some(c) => filtered(c.sp.get(&pair(s, p)), |_| true),
            None => filtered(self.s.get(s), |t| t.p() == p),
        }
    }

    fn with_predicate_object(&self, p: &Node, o: &Node) -> Vec<Triple> {
        match &self.combined {
            Some(c) => filtered(c.po.get(&pair(p, o)), |_| true),
            None => filtered(self.o.get(o), |t| t.p() == p),
        }
    }

    fn with_subject_object(&self, s: &Node, o: &Node) -> Vec<Triple> {
        match &self.combined {
            Some(c) => filtered(c.so.get(&pair(s, o)), |_| true),
            None => filtered(self.s.get(s), |t| t.o() == o),
        }
    }

    fn subject_nodes(&self) -> BTreeSet<Node> {
        self.s.keys().cloned().collect()
    }

    fn predicate_nodes(&self) -> BTreeSet<Node> {
        self.p.keys().cloned().collect()
    }

    fn object_nodes(&self) -> BTreeSet<Node> {
        self.o.keys().cloned().collect()
    }

    fn clear(&mut self) {
        self.store.clear();
        self.s.clear();
        self.p.clear();
        self.o.clear();
        if let Some(c) = &mut self.combined {
            *c = CombinedIndexes::default();
        }
    }

    fn dispose(&mut self) {
        self.clear();
        self.store.shrink_to_fit();
        self.s.shrink_to_fit();
        self.p.shrink_to_fit();
        self.o.shrink_to_fit();
    }

    fn check_consistency(&self) -> Result<()> {
        check_index("S", &self.s, &self.store, |t| t.s().clone(), true)?;
        check_index("P", &self.p, &self.store, |t| t.p().clone(), true)?;
        check_index("O", &self.o, &self.store, |t| t.o().clone(), true)?;
        if let Some(c) = &self.combined {
            check_index("SP", &c.sp, &self.store, |t| pair(t.s(), t.p()), true)?;
            check_index("PO", &c.po, &self.store, |t| pair(t.p(), t.o()), true)?;
            check_index("SO", &c.so, &self.store, |t| pair(t.s(), t.o()), true)?;
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
    fn full_index_flag_is_fixed_at_construction() {
        assert!(EagerCollection::new(true).is_fully_indexed());
        assert!(!EagerCollection::new(false).is_fully_indexed());
        assert!(EagerCollection::default().is_fully_indexed());
    }

    #[test]
    fn partial_index_answers_pair_queries() {
        for full in [true, false] {
            let mut c = EagerCollection::new(full);
            c.add(t("a", "p", "b"));
            c.add(t("a", "q", "b"));
            c.add(t("c", "p", "b"));
            assert_eq!(c.with_subject_predicate(&n("a"), &n("p")), vec![t("a", "p", "b")]);
            assert_eq!(c.with_predicate_object(&n("q"), &n("b")), vec![t("a", "q", "b")]);
            assert_eq!(c.with_subject_object(&n("c"), &n("b")), vec![t("c", "p", "b")]);
            assert!(c.with_subject_object(&n("b"), &n("a")).is_empty());
            c.check_consistency().unwrap();
        }
    }

    #[test]
    fn delete_drops_empty_keys() {
        let mut c = EagerCollection::new(true);
        c.add(t("a", "p", "b"));
        assert!(c.delete(&t("a", "p", "b")));
        assert!(c.subject_nodes().is_empty());
        assert!(c.object_nodes().is_empty());
        c.check_consistency().unwrap();
    }
}
