//! Error types for graph matching
use thiserror::Error;

/// Type alias for `Result` with default error [`MatchError`].
pub type Result<T, E = MatchError> = std::result::Result<T, E>;

/// Reasons why two graphs could not be compared.
///
/// Note that two graphs being different is *not* an error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// A triple has a blank node in subject, predicate and object position.
    #[error("Unsupported graph shape: every node of {0} is blank")]
    UnsupportedGraphShape(String),
    /// The search budget set in [`MatchOptions`](crate::MatchOptions) was exhausted
    /// before an answer was found.
    #[error("Matching abandoned after {steps} backtracking steps")]
    Indeterminate {
        /// The number of backtracking steps performed.
        steps: u64,
    },
}
