//! Turns engine records back into concrete state sequences and state sets.
//! The virtual sink never appears in anything produced here.

use fixedbitset::FixedBitSet;
use serde::Serialize;

use super::engine::{PathEngine, RecordId};
use super::target::TargetedView;
use crate::graph::StateId;

/// States of one path, target first and initial state last.
pub type OrderedStateList = Vec<StateId>;

/// One ranked witness path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedPath {
    /// 1-based rank among all loop-free paths into the target.
    pub rank: usize,
    /// Product of the transition probabilities along the path.
    pub probability: f64,
    /// Visited states, target first and initial state last.
    pub states: OrderedStateList,
}

/// Physical states of the path ending in record `id`, target first.
pub(crate) fn path_as_list(
    engine: &PathEngine,
    view: &TargetedView<'_>,
    id: RecordId,
) -> OrderedStateList {
    let sink = view.sink();
    engine
        .chain(id)
        .map(|r| r.state)
        .filter(|&s| s != sink)
        .collect()
}

/// Adds every physical state of the path ending in record `id` to `states`.
pub(crate) fn mark_states(
    engine: &PathEngine,
    view: &TargetedView<'_>,
    id: RecordId,
    states: &mut FixedBitSet,
) {
    let sink = view.sink();
    for record in engine.chain(id) {
        if record.state != sink {
            states.insert(record.state);
        }
    }
}

/// Builds the `RankedPath` for record `id`.
pub(crate) fn ranked_path(
    engine: &PathEngine,
    view: &TargetedView<'_>,
    rank: usize,
    id: RecordId,
) -> RankedPath {
    RankedPath {
        rank,
        probability: engine.record(id).probability,
        states: path_as_list(engine, view, id),
    }
}
