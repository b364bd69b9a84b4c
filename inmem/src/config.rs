//! Runtime selection of a [`TripleCollection`] implementation.

use crate::{EagerCollection, LazyCollection, SortedCollection, TripleCollection};
use std::fmt;

/// Whether [`EagerCollection`]s maintain the combined (SP, PO, SO) indexes
/// when no explicit choice is made.
pub const DEFAULT_FULL_INDEX: bool = true;

/// The available indexing strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IndexStrategy {
    /// Every index is updated on every mutation; see [`EagerCollection`].
    #[default]
    Eager,
    /// Keys are indexed when first queried; see [`LazyCollection`].
    Lazy,
    /// Sorted lists, re-sorted on demand; see [`SortedCollection`].
    Sorted,
}

impl IndexStrategy {
    /// All strategies.
    pub const ALL: [IndexStrategy; 3] = [
        IndexStrategy::Eager,
        IndexStrategy::Lazy,
        IndexStrategy::Sorted,
    ];
}

impl fmt::Display for IndexStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IndexStrategy::Eager => "eager",
            IndexStrategy::Lazy => "lazy",
            IndexStrategy::Sorted => "sorted",
        };
        f.write_str(name)
    }
}

/// Options used to build the triple collection of a graph.
///
/// They are read once, when the collection is [built](CollectionConfig::build),
/// and can not affect an existing collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectionConfig {
    /// Which implementation to build.
    pub strategy: IndexStrategy,
    /// Whether an eager collection maintains the combined (SP, PO, SO) indexes.
    /// Ignored by other strategies.
    pub full_index: bool,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        CollectionConfig {
            strategy: IndexStrategy::default(),
            full_index: DEFAULT_FULL_INDEX,
        }
    }
}

impl CollectionConfig {
    /// A configuration for the given strategy, with default options.
    pub fn new(strategy: IndexStrategy) -> Self {
        CollectionConfig {
            strategy,
            ..Self::default()
        }
    }

    /// Set [`full_index`](CollectionConfig::full_index).
    pub fn with_full_index(mut self, full_index: bool) -> Self {
        self.full_index = full_index;
        self
    }

    /// Build an empty collection according to this configuration.
    pub fn build(&self) -> Box<dyn TripleCollection> {
        log::debug!(
            "building {} triple collection (full_index: {})",
            self.strategy,
            self.full_index
        );
        match self.strategy {
            IndexStrategy::Eager => Box::new(EagerCollection::new(self.full_index)),
            IndexStrategy::Lazy => Box::new(LazyCollection::new()),
            IndexStrategy::Sorted => Box::new(SortedCollection::new()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_honours_strategy() {
        for strategy in IndexStrategy::ALL {
            let c = CollectionConfig::new(strategy).build();
            assert_eq!(c.strategy(), strategy);
            assert!(c.is_empty());
        }
    }

    #[test]
    fn default_is_fully_indexed_eager() {
        let config = CollectionConfig::default();
        assert_eq!(config.strategy, IndexStrategy::Eager);
        assert!(config.full_index);
        assert!(!config.with_full_index(false).full_index);
    }
}
