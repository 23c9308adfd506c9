use super::StateId;
use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for building and querying a `TransitionGraph`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A state index outside `[0, num_states)`.
    #[error("State index {state} is out of range for a graph with {num_states} states")]
    InvalidIndex { state: StateId, num_states: usize },

    /// Malformed input detected while building the graph.
    #[error("Malformed transition graph: {0}")]
    Configuration(String),
}
