use thiserror::Error;

/// Type alias for `Result` with default error `IndexError`.
pub type Result<T, E = IndexError> = std::result::Result<T, E>;

/// Errors raised by triple collections.
///
/// Pattern queries never fail: they return an empty result when nothing matches.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The canonical instance of a triple was requested, but no equal triple is stored.
    #[error("Triple not found in collection: {0}")]
    NotFound(String),
    /// A secondary index disagrees with the primary store.
    #[error("Index {index} disagrees with the primary store: {detail}")]
    Inconsistent {
        /// The name of the faulty index.
        index: &'static str,
        /// What the disagreement is.
        detail: String,
    },
}
