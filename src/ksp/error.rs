use crate::graph::{GraphError, StateId};
use thiserror::Error;

// Error type for k-shortest-path queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KspError {
    /// The initial state or a target state is outside `[0, num_states)`.
    #[error("State index {state} is out of range for a graph with {num_states} states")]
    InvalidIndex { state: StateId, num_states: usize },

    /// No path leads from the initial state to the target.
    #[error("Target is unreachable from initial state {initial}")]
    UnreachableTarget { initial: StateId },

    /// Fewer loop-free paths exist than the requested rank.
    #[error("k={requested} but there are only {available} loop-free paths to the target")]
    RankExceedsPathCount { requested: usize, available: usize },

    /// Malformed input detected at construction or an invalid query argument.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<GraphError> for KspError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::InvalidIndex { state, num_states } => {
                KspError::InvalidIndex { state, num_states }
            }
            GraphError::Configuration(reason) => KspError::Configuration(reason),
        }
    }
}
