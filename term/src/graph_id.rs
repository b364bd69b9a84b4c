//! Identity of the graph owning a blank node.
//!
//! Blank nodes do not point back to their graph:
//! they only carry a small integer, compared by value.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// A small integer identifying the graph which minted a blank node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    /// The id used for blank nodes that do not belong to any graph yet
    /// (e.g. in test fixtures or in graph literals).
    pub const DETACHED: GraphId = GraphId(0);

    /// Allocate an id which has never been returned by this function before
    /// in the current process.
    pub fn fresh() -> Self {
        GraphId(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Build a graph id from a known value.
    pub const fn new(value: u64) -> Self {
        GraphId(value)
    }

    /// The underlying integer.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_ids_are_distinct() {
        let g1 = GraphId::fresh();
        let g2 = GraphId::fresh();
        assert_ne!(g1, g2);
        assert_ne!(g1, GraphId::DETACHED);
        assert_ne!(g2, GraphId::DETACHED);
    }
}
