//! This crate is part of Trine,
//! an in-memory [RDF] core in Rust.
//!
//! It provides the triple collections owned by graphs.
//! All of them implement the [`TripleCollection`] contract,
//! and must answer every query identically,
//! but they make very different trade-offs between load time,
//! query time and memory footprint:
//!
//! * [`EagerCollection`] maintains all its indexes on every insertion and deletion;
//! * [`LazyCollection`] indexes a key only when it is queried for the first time,
//!   making its indexes double as a query cache;
//! * [`SortedCollection`] keeps up to three sorted copies of its triples,
//!   re-sorted on demand after any mutation.
//!
//! Use [`CollectionConfig`] to pick one at runtime.
//!
//! [RDF]: https://www.w3.org/TR/rdf-primer/
#![deny(missing_docs)]

mod _error;
pub use _error::*;

pub mod collection;
pub mod config;
pub mod eager;
pub mod index;
pub mod lazy;
pub mod sorted;
pub mod store;

pub use collection::{TripleCollection, TripleCollectionExt};
pub use config::{CollectionConfig, IndexStrategy};
pub use eager::EagerCollection;
pub use lazy::LazyCollection;
pub use sorted::SortedCollection;
pub use store::TripleStore;

#[cfg(test)]
mod test;

#[cfg(test)]
fn test_setup() {
    TEST_SETUP.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[cfg(test)]
static TEST_SETUP: std::sync::Once = std::sync::Once::new();
