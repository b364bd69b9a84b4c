//! I define [`Triple`], the atomic RDF statement.
//!
//! A triple is cheap to clone (it is reference-counted),
//! and its hash is computed once, when it is built.

use crate::{BlankNode, Node};
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

/// An immutable (subject, predicate, object) statement.
#[derive(Clone)]
pub struct Triple(Arc<TripleInner>);

struct TripleInner {
    spo: [Node; 3],
    hash: u64,
    collision: AtomicBool,
}

impl Triple {
    /// Build a triple, computing its hash.
    pub fn new<S, P, O>(s: S, p: P, o: O) -> Self
    where
        S: Into<Node>,
        P: Into<Node>,
        O: Into<Node>,
    {
        Self::from_spo([s.into(), p.into(), o.into()])
    }

    /// Build a triple from an array of nodes, computing its hash.
    pub fn from_spo(spo: [Node; 3]) -> Self {
        let mut hasher = DefaultHasher::new();
        spo.hash(&mut hasher);
        let hash = hasher.finish();
        Triple(Arc::new(TripleInner {
            spo,
            hash,
            collision: AtomicBool::new(false),
        }))
    }

    /// The subject of this triple.
    #[inline]
    pub fn s(&self) -> &Node {
        &self.0.spo[0]
    }

    /// The predicate of this triple.
    #[inline]
    pub fn p(&self) -> &Node {
        &self.0.spo[1]
    }

    /// The object of this triple.
    #[inline]
    pub fn o(&self) -> &Node {
        &self.0.spo[2]
    }

    /// The three nodes of this triple.
    #[inline]
    pub fn spo(&self) -> &[Node; 3] {
        &self.0.spo
    }

    /// The three nodes of this triple, as an iterator.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.0.spo.iter()
    }

    /// The hash computed when this triple was built.
    #[inline]
    pub fn stable_hash(&self) -> u64 {
        self.0.hash
    }

    /// Whether another, unequal, triple sharing this triple's hash
    /// has been met by a collection holding this triple.
    ///
    /// This flag is purely informational.
    pub fn collision(&self) -> bool {
        self.0.collision.load(AtomicOrdering::Relaxed)
    }

    /// Flag this triple as colliding with another one.
    ///
    /// The flag is shared by all clones of this triple.
    pub fn mark_collision(&self) {
        self.0.collision.store(true, AtomicOrdering::Relaxed)
    }

    /// Whether this triple contains no blank node.
    pub fn is_ground(&self) -> bool {
        !self.0.spo.iter().any(Node::is_blank)
    }

    /// Whether `n` appears in any position of this triple.
    pub fn involves(&self, n: &Node) -> bool {
        self.0.spo.iter().any(|m| m == n)
    }

    /// The blank nodes of this triple, in (S,P,O) order, with repetitions.
    pub fn blank_nodes(&self) -> impl Iterator<Item = &BlankNode> + '_ {
        self.0.spo.iter().filter_map(Node::as_blank)
    }

    /// Whether all three positions of this triple hold a blank node.
    pub fn is_all_blank(&self) -> bool {
        self.0.spo.iter().all(Node::is_blank)
    }

    /// Return a new triple where every blank node is replaced by the result of `f`.
    pub fn map_blank_nodes<F>(&self, mut f: F) -> Triple
    where
        F: FnMut(&BlankNode) -> BlankNode,
    {
        Triple::from_spo(self.0.spo.clone().map(|n| match n {
            Node::Blank(b) => Node::Blank(f(&b)),
            other => other,
        }))
    }

    /// Compare in (subject, predicate, object) order; this is also the [`Ord`] of triples.
    pub fn cmp_spo(&self, other: &Triple) -> Ordering {
        self.0.spo.cmp(&other.0.spo)
    }

    /// Compare in (predicate, object, subject) order.
    pub fn cmp_pos(&self, other: &Triple) -> Ordering {
        self.p()
            .cmp(other.p())
            .then_with(|| self.o().cmp(other.o()))
            .then_with(|| self.s().cmp(other.s()))
    }

    /// Compare in (object, subject, predicate) order.
    pub fn cmp_osp(&self, other: &Triple) -> Ordering {
        self.o()
            .cmp(other.o())
            .then_with(|| self.s().cmp(other.s()))
            .then_with(|| self.p().cmp(other.p()))
    }
}

impl PartialEq for Triple {
    fn eq(&self, other: &Triple) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || (self.0.hash == other.0.hash && self.0.spo == other.0.spo)
    }
}

impl Eq for Triple {}

impl Hash for Triple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash)
    }
}

impl PartialOrd for Triple {
    fn partial_cmp(&self, other: &Triple) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Triple {
    fn cmp(&self, other: &Triple) -> Ordering {
        self.cmp_spo(other)
    }
}

impl fmt::Debug for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triple({} {} {})", self.s(), self.p(), self.o())
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.s(), self.p(), self.o())
    }
}
