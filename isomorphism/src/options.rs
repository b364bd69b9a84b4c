use std::time::{Duration, Instant};

/// What is being checked by a [`GraphMatcher`](crate::GraphMatcher).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// The source and the target must be the same graph, up to blank node relabeling.
    Equal,
    /// Every triple of the source must be found in the target, up to blank node relabeling;
    /// the target may have more triples.
    SubGraph,
}

/// Bounds on the backtracking search.
///
/// The default is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// The maximum number of candidate bindings tried while backtracking.
    pub step_limit: Option<u64>,
    /// The instant after which backtracking is abandoned.
    pub deadline: Option<Instant>,
}

impl MatchOptions {
    /// Unbounded options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of backtracking steps.
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.step_limit = Some(steps);
        self
    }

    /// Set the instant after which backtracking is abandoned.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abandon backtracking once `timeout` has elapsed from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Whether neither a step limit nor a deadline is set.
    pub fn is_unbounded(&self) -> bool {
        self.step_limit.is_none() && self.deadline.is_none()
    }
}
