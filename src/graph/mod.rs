// error module
mod error;
// transition_graph module
mod transition_graph;

/// Dense state identifier in `[0, num_states)`.
pub type StateId = usize;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the graph modules.
//─────────────────────────────────────────────────────────────────────────────
pub use error::GraphError;
pub use transition_graph::{Transition, TransitionGraph, TransitionGraphBuilder};
