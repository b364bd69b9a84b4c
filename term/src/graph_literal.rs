//! Graph literals, i.e. Notation3 formulae quoted as nodes.

use crate::Triple;
use std::fmt;
use std::sync::Arc;

/// An immutable set of triples used as a node.
///
/// Triples are kept sorted and de-duplicated,
/// so that the derived equality, hash and order are structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphLiteral(Arc<[Triple]>);

impl GraphLiteral {
    /// Build a graph literal from the given triples.
    pub fn new<I: IntoIterator<Item = Triple>>(triples: I) -> Self {
        let mut triples: Vec<Triple> = triples.into_iter().collect();
        triples.sort();
        triples.dedup();
        GraphLiteral(triples.into())
    }

    /// The triples of this formula, in (S,P,O) order.
    pub fn triples(&self) -> &[Triple] {
        &self.0
    }

    /// The number of triples in this formula.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this formula is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GraphLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for t in self.0.iter() {
            write!(f, " {t}")?;
        }
        f.write_str(" }")
    }
}
