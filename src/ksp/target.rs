//! Target binding: collapses the physical target state(s) into one virtual
//! sink so the engine always searches for paths into a single state.
//!
//! The sink gets index `N` (one past the last physical state). Every member
//! loses its regular outgoing edges in this view and instead has exactly one
//! edge into the sink, weighted by the member's exit probability. A path
//! therefore ends at the first member it reaches.

use std::slice;

use super::error::KspError;
use crate::graph::{StateId, Transition, TransitionGraph};

/// The destination of a path query.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    /// A single physical state.
    State(StateId),
    /// Any state of a non-empty group; a path ends at the first member it reaches.
    Group(Vec<StateId>),
    /// A group whose members lead into the target with the given exit probability.
    Weighted(Vec<(StateId, f64)>),
}

impl Target {
    /// Member states paired with their exit probability, sorted and de-duplicated.
    fn exits(&self) -> Result<Vec<(StateId, f64)>, KspError> {
        let mut exits = match self {
            Target::State(state) => vec![(*state, 1.0)],
            Target::Group(states) => states.iter().map(|&s| (s, 1.0)).collect(),
            Target::Weighted(weighted) => weighted.clone(),
        };
        if exits.is_empty() {
            return Err(KspError::Configuration(
                "target group must contain at least one state".to_string(),
            ));
        }
        for &(state, probability) in &exits {
            if !(probability.is_finite() && probability > 0.0 && probability <= 1.0) {
                return Err(KspError::Configuration(format!(
                    "exit probability {} of target state {} is not in (0, 1]",
                    probability, state
                )));
            }
        }

        exits.sort_by(|a, b| a.0.cmp(&b.0));
        let mut merged: Vec<(StateId, f64)> = Vec::with_capacity(exits.len());
        for (state, probability) in exits {
            match merged.last() {
                Some(&(last, p)) if last == state => {
                    if p != probability {
                        return Err(KspError::Configuration(format!(
                            "target state {} listed with conflicting exit probabilities {} and {}",
                            state, p, probability
                        )));
                    }
                }
                _ => merged.push((state, probability)),
            }
        }
        Ok(merged)
    }
}

impl From<StateId> for Target {
    fn from(state: StateId) -> Self {
        Target::State(state)
    }
}

impl From<Vec<StateId>> for Target {
    fn from(states: Vec<StateId>) -> Self {
        Target::Group(states)
    }
}

impl From<&[StateId]> for Target {
    fn from(states: &[StateId]) -> Self {
        Target::Group(states.to_vec())
    }
}

/// Read-only view of a `TransitionGraph` extended with the virtual sink.
#[derive(Clone, Debug)]
pub(crate) struct TargetedView<'g> {
    graph: &'g TransitionGraph,
    sink: StateId,
    // Some(edge into the sink) for target members.
    exits: Vec<Option<Transition>>,
    members: Vec<StateId>,
}

impl<'g> TargetedView<'g> {
    pub(crate) fn bind(graph: &'g TransitionGraph, target: &Target) -> Result<Self, KspError> {
        let sink = graph.num_states();
        let mut exits = vec![None; sink];
        let mut members = Vec::new();
        for (state, probability) in target.exits()? {
            graph.check_index(state)?;
            exits[state] = Some(Transition {
                state: sink,
                probability,
            });
            members.push(state);
        }
        Ok(Self {
            graph,
            sink,
            exits,
            members,
        })
    }

    pub(crate) fn graph(&self) -> &'g TransitionGraph {
        self.graph
    }

    pub(crate) fn sink(&self) -> StateId {
        self.sink
    }

    /// Physical states plus the sink.
    pub(crate) fn num_states(&self) -> usize {
        self.sink + 1
    }

    pub(crate) fn members(&self) -> &[StateId] {
        &self.members
    }

    pub(crate) fn is_member(&self, state: StateId) -> bool {
        self.exits.get(state).is_some_and(Option::is_some)
    }

    pub(crate) fn successors(&self, state: StateId) -> &[Transition] {
        if state == self.sink {
            return &[];
        }
        match &self.exits[state] {
            Some(exit) => slice::from_ref(exit),
            None => self.graph.successors_of(state),
        }
    }

    /// Exit probability of `state` into the sink, `None` for non-members.
    pub(crate) fn exit_probability(&self, state: StateId) -> Option<f64> {
        self.exits.get(state).copied().flatten().map(|exit| exit.probability)
    }
}
