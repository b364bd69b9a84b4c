//! I define [`Graph`], the owner of a set of triples.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use trine_inmem::collection::normalized;
use trine_inmem::{CollectionConfig, IndexStrategy, TripleCollection};
use trine_isomorphism::{BnodeMapping, GraphMatcher, Result as MatchResult, TripleSet};
use trine_term::{BlankNode, GraphId, Node, TermError, Triple};

/// Prefix of the labels minted by [`Graph::new_blank_node`].
pub const AUTO_LABEL_PREFIX: &str = "autos";

/// An RDF graph: a set of triples, owning its blank nodes.
///
/// Every graph gets a fresh [`GraphId`] when it is built.
/// Blank nodes minted by a graph carry that id,
/// so that blank nodes with the same label in two different graphs are distinct.
#[derive(Debug)]
pub struct Graph {
    id: GraphId,
    triples: Box<dyn TripleCollection>,
    next_label: AtomicU64,
}

impl Graph {
    /// An empty graph, using the default [`CollectionConfig`].
    pub fn new() -> Self {
        Self::with_config(CollectionConfig::default())
    }

    /// An empty graph, storing its triples as described by `config`.
    pub fn with_config(config: CollectionConfig) -> Self {
        let id = GraphId::fresh();
        log::debug!("new graph {id} with {config:?}");
        Graph {
            id,
            triples: config.build(),
            next_label: AtomicU64::new(1),
        }
    }

    /// The identifier of this graph.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// The indexing strategy of the underlying collection.
    pub fn strategy(&self) -> IndexStrategy {
        self.triples.strategy()
    }

    /// The underlying collection.
    pub fn collection(&self) -> &dyn TripleCollection {
        &*self.triples
    }

    /// A blank node owned by this graph, labelled `label`.
    ///
    /// # Error
    /// If `label` is not a valid blank node label.
    pub fn blank_node<U: AsRef<str>>(&self, label: U) -> Result<Node, TermError> {
        Node::blank(label, self.id)
    }

    /// A new blank node owned by this graph,
    /// with a label never used by a triple asserted in this graph.
    pub fn new_blank_node(&self) -> Node {
        let n = self.next_label.fetch_add(1, Ordering::Relaxed);
        Node::blank_unchecked(format!("{AUTO_LABEL_PREFIX}{n}"), self.id)
    }

    /// Make sure [`Graph::new_blank_node`] never mints a label used in `t`.
    fn reserve_labels(&self, t: &Triple) {
        for b in t.blank_nodes().filter(|b| b.graph() == self.id) {
            let minted = b
                .label()
                .strip_prefix(AUTO_LABEL_PREFIX)
                .and_then(|n| n.parse::<u64>().ok());
            if let Some(n) = minted {
                self.next_label.fetch_max(n.saturating_add(1), Ordering::Relaxed);
            }
        }
    }

    /// A copy of `t` where blank nodes owned by another graph are moved to this graph,
    /// keeping their labels.
    pub fn import_triple(&self, t: &Triple) -> Triple {
        if t.blank_nodes().all(|b| b.graph() == self.id) {
            return t.clone();
        }
        t.map_blank_nodes(|b: &BlankNode| b.rehome(self.id))
    }

    /// Insert the triple `(s, p, o)`; return `false` if it was already present.
    pub fn assert<S, P, O>(&mut self, s: S, p: P, o: O) -> bool
    where
        S: Into<Node>,
        P: Into<Node>,
        O: Into<Node>,
    {
        self.assert_triple(Triple::new(s, p, o))
    }

    /// Insert `t`; return `false` if it was already present.
    pub fn assert_triple(&mut self, t: Triple) -> bool {
        self.reserve_labels(&t);
        self.triples.add(t)
    }

    /// Insert all the given triples; return how many were not already present.
    pub fn assert_all<I>(&mut self, triples: I) -> usize
    where
        I: IntoIterator<Item = Triple>,
    {
        triples.into_iter().filter(|t| self.assert_triple(t.clone())).count()
    }

    /// Remove `t`; return `false` if it was absent.
    pub fn retract(&mut self, t: &Triple) -> bool {
        self.triples.delete(t)
    }

    /// Remove every triple matching the given pattern (`None` matches anything);
    /// return how many were removed.
    pub fn retract_matching(&mut self, s: Option<&Node>, p: Option<&Node>, o: Option<&Node>) -> usize {
        let victims = self.triples.triples_matching(s, p, o);
        victims.iter().filter(|t| self.triples.delete(t)).count()
    }

    /// Whether `t` is in this graph.
    pub fn contains(&self, t: &Triple) -> bool {
        self.triples.contains(t)
    }

    /// The number of triples in this graph.
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether this graph is empty.
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// All the triples of this graph, in no particular order.
    pub fn triples(&self) -> Vec<Triple> {
        self.triples.triples()
    }

    /// The triples with subject `s`.
    pub fn with_subject(&self, s: &Node) -> Vec<Triple> {
        self.triples.with_subject(s)
    }

    /// The triples with predicate `p`.
    pub fn with_predicate(&self, p: &Node) -> Vec<Triple> {
        self.triples.with_predicate(p)
    }

    /// The triples with object `o`.
    pub fn with_object(&self, o: &Node) -> Vec<Triple> {
        self.triples.with_object(o)
    }

    /// The triples with subject `s` and predicate `p`.
    pub fn with_subject_predicate(&self, s: &Node, p: &Node) -> Vec<Triple> {
        self.triples.with_subject_predicate(s, p)
    }

    /// The triples with predicate `p` and object `o`.
    pub fn with_predicate_object(&self, p: &Node, o: &Node) -> Vec<Triple> {
        self.triples.with_predicate_object(p, o)
    }

    /// The triples with subject `s` and object `o`.
    pub fn with_subject_object(&self, s: &Node, o: &Node) -> Vec<Triple> {
        self.triples.with_subject_object(s, o)
    }

    /// The triples matching the given pattern, where `None` matches any node.
    pub fn triples_matching(&self, s: Option<&Node>, p: Option<&Node>, o: Option<&Node>) -> Vec<Triple> {
        self.triples.triples_matching(s, p, o)
    }

    /// The distinct subjects of this graph.
    pub fn subjects(&self) -> BTreeSet<Node> {
        self.triples.subject_nodes()
    }

    /// The distinct predicates of this graph.
    pub fn predicates(&self) -> BTreeSet<Node> {
        self.triples.predicate_nodes()
    }

    /// The distinct objects of this graph.
    pub fn objects(&self) -> BTreeSet<Node> {
        self.triples.object_nodes()
    }

    /// Remove all triples, and release the memory held by indexes.
    pub fn clear(&mut self) {
        self.triples.dispose();
    }

    /// Whether this graph and `other` are equal, up to blank node relabeling.
    ///
    /// On success, the mapping from the blank nodes of `self` to those of `other` is returned.
    ///
    /// # Error
    /// If either graph contains a triple made only of blank nodes.
    pub fn equals(&self, other: &Graph) -> MatchResult<(bool, Option<BnodeMapping>)> {
        self.equals_with(other, &GraphMatcher::default())
    }

    /// Same as [`Graph::equals`], using a specific `matcher`
    /// (e.g. to bound the search).
    ///
    /// # Error
    /// If either graph contains a triple made only of blank nodes,
    /// or if the matcher's budget is exhausted.
    pub fn equals_with(
        &self,
        other: &Graph,
        matcher: &GraphMatcher,
    ) -> MatchResult<(bool, Option<BnodeMapping>)> {
        matcher.equals(self.collection(), other.collection())
    }

    /// Whether every triple of this graph is in `other`, up to blank node relabeling.
    ///
    /// On success, the mapping from the blank nodes of `self` to those of `other` is returned.
    ///
    /// # Error
    /// If either graph contains a triple made only of blank nodes.
    pub fn is_subgraph_of(&self, other: &Graph) -> MatchResult<(bool, Option<BnodeMapping>)> {
        GraphMatcher::default().is_subgraph_of(self.collection(), other.collection())
    }

    /// Whether every triple of `other` is in this graph, up to blank node relabeling.
    ///
    /// On success, the mapping from the blank nodes of `other` to those of `self` is returned.
    ///
    /// # Error
    /// If either graph contains a triple made only of blank nodes.
    pub fn has_subgraph(&self, other: &Graph) -> MatchResult<(bool, Option<BnodeMapping>)> {
        other.is_subgraph_of(self)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        self.triples.dispose();
    }
}

impl TripleSet for Graph {
    fn triple_vec(&self) -> Vec<Triple> {
        self.triples()
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.assert_all(iter);
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut g = Graph::new();
        g.assert_all(iter);
        g
    }
}

/// One triple per line, in (S,P,O) order.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in normalized(self.triples()) {
            writeln!(f, "{t}")?;
        }
        Ok(())
    }
}
