// transition_graph.rs
// ──────────────────────────────────────────────────────────────────────────────
// Explicit, state-indexed view of a discrete-time probabilistic transition
// system.  Every state keeps its outgoing transitions in insertion order; the
// incoming transitions are derived once by inverting the forward edges.  The
// graph is immutable after construction and can be shared between any number
// of path queries.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::HashSet;

use super::error::GraphError;
use super::StateId;

/// One weighted edge as seen from a state.
///
/// In a successor list `state` is the destination; in a predecessor list it is
/// the source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub state: StateId,
    pub probability: f64,
}

/// Immutable directed graph with forward and backward adjacency.
#[derive(Clone, Debug, Default)]
pub struct TransitionGraph {
    successors: Vec<Vec<Transition>>,
    predecessors: Vec<Vec<Transition>>,
    num_transitions: usize,
}

impl TransitionGraph {
    /// Builds a graph over `num_states` states from `(source, destination, probability)` triples.
    ///
    /// # Errors
    /// * `GraphError::InvalidIndex` if an endpoint is not in `[0, num_states)`.
    /// * `GraphError::Configuration` for probabilities outside `(0, 1]` and for
    ///   a repeated ordered pair (parallel edges must be aggregated beforehand).
    pub fn from_transitions<I>(num_states: usize, transitions: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (StateId, StateId, f64)>,
    {
        let mut builder = TransitionGraphBuilder::new(num_states);
        for (source, destination, probability) in transitions {
            builder.add_transition(source, destination, probability)?;
        }
        builder.build()
    }

    /// Number of states `N`.
    pub fn num_states(&self) -> usize {
        self.successors.len()
    }

    /// Number of transitions `E`.
    pub fn num_transitions(&self) -> usize {
        self.num_transitions
    }

    /// Returns `true` if `state` is a valid index of this graph.
    pub fn contains(&self, state: StateId) -> bool {
        state < self.num_states()
    }

    /// Outgoing transitions of `state`, in insertion order.
    pub fn successors(&self, state: StateId) -> Result<&[Transition], GraphError> {
        self.check_index(state)?;
        Ok(&self.successors[state])
    }

    /// Incoming transitions of `state`; `Transition::state` is the source.
    pub fn predecessors(&self, state: StateId) -> Result<&[Transition], GraphError> {
        self.check_index(state)?;
        Ok(&self.predecessors[state])
    }

    /// Probability of the edge `source -> destination`, if there is one.
    pub fn probability(&self, source: StateId, destination: StateId) -> Option<f64> {
        self.successors
            .get(source)?
            .iter()
            .find(|t| t.state == destination)
            .map(|t| t.probability)
    }

    /// Fails with `GraphError::InvalidIndex` unless `state` is in range.
    pub fn check_index(&self, state: StateId) -> Result<(), GraphError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(GraphError::InvalidIndex {
                state,
                num_states: self.num_states(),
            })
        }
    }

    // Unchecked accessors for callers that validated their indices up front.
    pub(crate) fn successors_of(&self, state: StateId) -> &[Transition] {
        &self.successors[state]
    }

    pub(crate) fn predecessors_of(&self, state: StateId) -> &[Transition] {
        &self.predecessors[state]
    }
}

/// Incremental construction of a `TransitionGraph`.
#[derive(Debug, Default)]
pub struct TransitionGraphBuilder {
    num_states: usize,
    successors: Vec<Vec<Transition>>,
    seen: HashSet<(StateId, StateId)>,
}

impl TransitionGraphBuilder {
    pub fn new(num_states: usize) -> Self {
        Self {
            num_states,
            successors: vec![Vec::new(); num_states],
            seen: HashSet::new(),
        }
    }

    /// Adds the edge `source -> destination` with the given probability.
    pub fn add_transition(
        &mut self,
        source: StateId,
        destination: StateId,
        probability: f64,
    ) -> Result<&mut Self, GraphError> {
        for state in [source, destination] {
            if state >= self.num_states {
                return Err(GraphError::InvalidIndex {
                    state,
                    num_states: self.num_states,
                });
            }
        }
        if !(probability.is_finite() && probability > 0.0 && probability <= 1.0) {
            return Err(GraphError::Configuration(format!(
                "transition {} -> {} has probability {}, expected a value in (0, 1]",
                source, destination, probability
            )));
        }
        if !self.seen.insert((source, destination)) {
            return Err(GraphError::Configuration(format!(
                "duplicate transition {} -> {}",
                source, destination
            )));
        }
        self.successors[source].push(Transition {
            state: destination,
            probability,
        });
        Ok(self)
    }

    /// Finalizes the graph, inverting the forward edges into predecessor lists.
    pub fn build(self) -> Result<TransitionGraph, GraphError> {
        let mut predecessors = vec![Vec::new(); self.num_states];
        for (source, transitions) in self.successors.iter().enumerate() {
            for t in transitions {
                predecessors[t.state].push(Transition {
                    state: source,
                    probability: t.probability,
                });
            }
        }
        Ok(TransitionGraph {
            successors: self.successors,
            predecessors,
            num_transitions: self.seen.len(),
        })
    }
}
