use std::collections::BTreeMap;
use std::fmt;
use trine_term::{BlankNode, Triple};

/// An injective mapping from the blank nodes of a source graph
/// to the blank nodes of a target graph.
///
/// It is returned by [`GraphMatcher`](crate::GraphMatcher) as the witness of a successful match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BnodeMapping(BTreeMap<BlankNode, BlankNode>);

impl BnodeMapping {
    /// The image of `b`, if `b` is mapped.
    pub fn get(&self, b: &BlankNode) -> Option<&BlankNode> {
        self.0.get(b)
    }

    /// The number of mapped blank nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no blank node is mapped.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The (source, target) pairs of this mapping, ordered by source.
    pub fn iter(&self) -> impl Iterator<Item = (&BlankNode, &BlankNode)> + '_ {
        self.0.iter()
    }

    /// The image of `t`, where mapped blank nodes are replaced; other nodes are kept.
    pub fn apply(&self, t: &Triple) -> Triple {
        if t.is_ground() {
            return t.clone();
        }
        t.map_blank_nodes(|b| self.0.get(b).unwrap_or(b).clone())
    }
}

impl FromIterator<(BlankNode, BlankNode)> for BnodeMapping {
    fn from_iter<I: IntoIterator<Item = (BlankNode, BlankNode)>>(iter: I) -> Self {
        BnodeMapping(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BnodeMapping {
    type Item = (&'a BlankNode, &'a BlankNode);
    type IntoIter = std::collections::btree_map::Iter<'a, BlankNode, BlankNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for BnodeMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (from, to)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{from} -> {to}")?;
        }
        write!(f, "}}")
    }
}
