//! Ranked enumeration of loop-free paths into the sink.
//!
//! Every ranked path is a `PathRecord` in an arena: its state, probability,
//! hop count and a handle to the record of its prefix. `ranked[s][k - 1]` is
//! the handle of the k-th best loop-free path ending at `s` found so far.
//! Records are only ever appended, so handles stay valid for the lifetime of
//! the engine.
//!
//! Rank 1 of every reachable state comes from the `DistanceMap`. Further ranks
//! come from per-state candidate queues: a candidate is a ranked record at a
//! predecessor plus one edge. The deviations of a rank-1 record are queued
//! lazily, the first time the search gets to that record.
//!
//! Rank-1 records waiting for their deviations and the head candidate of each
//! state wait in two heaps keyed by the best probability a target path through
//! them can still reach: their own probability times the best completion of
//! their state into the sink. Keys never grow along an edge, so the work is
//! done in non-increasing key order. At the sink the key is the probability of
//! the path itself, which makes target ranks come out in order, and the search
//! stops as soon as the requested rank exists. Nothing whose key lies below the
//! requested rank is ever expanded.
//!
//! Requests for rank k at the sink may need arbitrary ranks at ancestors.
//! Pulling those recursively deadlocks as soon as a candidate is discarded for
//! revisiting the requesting state (its replacement may depend on the very
//! rank being computed), so the work-list drives everything forward instead.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use super::distance::{best_completion, DistanceMap};
use super::target::TargetedView;
use crate::graph::StateId;
use crate::log_debug;

/// Keys of unfinished paths are scaled by this factor so that rounding in the
/// completion products never ranks a prefix below one of its own completions.
const ROUNDING_SLACK: f64 = 1.0 + 1e-9;

/// Handle of a record in the engine's arena.
pub(crate) type RecordId = usize;

/// The k-th best path into `state`, stored as a link to its prefix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PathRecord {
    pub state: StateId,
    pub predecessor: Option<RecordId>,
    pub probability: f64,
    pub hops: usize,
}

/// Extension of record `via` by one edge.
///
/// Ordered so that the max-heap yields the most probable candidate first;
/// ties go to fewer hops, then the lower predecessor state, then the older
/// predecessor record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    probability: OrderedFloat<f64>,
    hops: Reverse<usize>,
    via_state: Reverse<StateId>,
    via: Reverse<RecordId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    key: OrderedFloat<f64>,
    head: Candidate,
    state: Reverse<StateId>,
}

/// A rank-1 record whose deviations are not queued yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PendingSeed {
    key: OrderedFloat<f64>,
    hops: Reverse<usize>,
    record: Reverse<RecordId>,
}

/// Counters describing how much work the engine has done so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Materialized (state, rank) records, rank-1 records included.
    pub records: usize,
    /// Rank-1 records whose deviations have been queued.
    pub seeded: usize,
    /// Candidates rejected because they would revisit a state.
    pub discarded: usize,
    /// Candidates promoted to a rank beyond the first.
    pub steps: usize,
}

#[derive(Debug)]
pub(crate) struct PathEngine {
    records: Vec<PathRecord>,
    ranked: Vec<Vec<RecordId>>,
    candidates: Vec<BinaryHeap<Candidate>>,
    frontier: BinaryHeap<FrontierEntry>,
    pending: BinaryHeap<PendingSeed>,
    // best completion into the sink, 0.0 where the sink is out of reach
    completion: Vec<f64>,
    sink: StateId,
    stats: EngineStats,
}

impl PathEngine {
    /// Materializes rank 1 of every reachable state from `distances`.
    pub(crate) fn new(view: &TargetedView<'_>, distances: &DistanceMap) -> Self {
        let n = view.num_states();
        let sink = view.sink();
        let mut completion = best_completion(view);
        for (state, bound) in completion.iter_mut().enumerate() {
            if state != sink {
                *bound *= ROUNDING_SLACK;
            }
        }

        let mut engine = Self {
            records: Vec::with_capacity(distances.settle_order().len()),
            ranked: vec![Vec::new(); n],
            candidates: vec![BinaryHeap::new(); n],
            frontier: BinaryHeap::new(),
            pending: BinaryHeap::new(),
            completion,
            sink,
            stats: EngineStats::default(),
        };
        for &state in distances.settle_order() {
            let predecessor = distances
                .predecessor(state)
                .and_then(|p| engine.ranked[p].first().copied());
            let record = PathRecord {
                state,
                predecessor,
                probability: distances.probability(state),
                hops: distances.hops(state),
            };
            let id = engine.push_record(record);
            if state != sink && engine.completion[state] > 0.0 {
                let key = engine.key(state, record.probability);
                engine.pending.push(PendingSeed {
                    key,
                    hops: Reverse(record.hops),
                    record: Reverse(id),
                });
            }
        }
        engine
    }

    pub(crate) fn record(&self, id: RecordId) -> &PathRecord {
        &self.records[id]
    }

    /// Handle of the `rank`-th (1-based) path into `state`, if already computed.
    pub(crate) fn ranked(&self, state: StateId, rank: usize) -> Option<RecordId> {
        rank.checked_sub(1)
            .and_then(|i| self.ranked[state].get(i))
            .copied()
    }

    /// Number of ranks computed so far for `state`.
    pub(crate) fn rank_count(&self, state: StateId) -> usize {
        self.ranked[state].len()
    }

    pub(crate) fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Grows the ranking of `state` until it holds `rank` paths.
    ///
    /// Returns the number of paths available when that is impossible, i.e.
    /// when every loop-free path into `state` has been enumerated. The work
    /// is directed at the sink; other states are served correctly but without
    /// that bound.
    pub(crate) fn extend_to(
        &mut self,
        view: &TargetedView<'_>,
        state: StateId,
        rank: usize,
    ) -> Result<RecordId, usize> {
        if let Some(id) = self.ranked(state, rank) {
            return Ok(id);
        }
        while self.rank_count(state) < rank {
            if !self.step(view) {
                log_debug!(
                    "engine exhausted: state {} has {} loop-free paths, rank {} requested",
                    state,
                    self.rank_count(state),
                    rank
                );
                return Err(self.rank_count(state));
            }
        }
        log_debug!(
            "engine reached rank {} at state {} ({} records, {} seeded, {} discarded)",
            rank,
            state,
            self.stats.records,
            self.stats.seeded,
            self.stats.discarded
        );
        self.ranked(state, rank).ok_or(self.rank_count(state))
    }

    /// Walks the prefix chain starting at `id`, newest state first.
    pub(crate) fn chain(&self, id: RecordId) -> Chain<'_> {
        Chain {
            engine: self,
            next: Some(id),
        }
    }

    /// Best probability a target path through a path of `probability` ending
    /// at `state` can reach.
    fn key(&self, state: StateId, probability: f64) -> OrderedFloat<f64> {
        if state == self.sink {
            OrderedFloat(probability)
        } else {
            OrderedFloat(probability * self.completion[state])
        }
    }

    /// Does the next unit of work in key order: queues the deviations of a
    /// rank-1 record, or promotes a candidate to the next rank of its state.
    /// Returns `true` after a promotion and `false` once nothing is left.
    fn step(&mut self, view: &TargetedView<'_>) -> bool {
        loop {
            let seed_first = match (self.pending.peek(), self.frontier.peek()) {
                (None, None) => return false,
                (Some(seed), Some(entry)) => seed.key >= entry.key,
                (Some(_), None) => true,
                (None, Some(_)) => false,
            };
            if seed_first {
                if let Some(PendingSeed {
                    record: Reverse(id),
                    ..
                }) = self.pending.pop()
                {
                    self.stats.seeded += 1;
                    self.expand(view, id, true);
                }
                continue;
            }

            let Some(entry) = self.frontier.pop() else {
                return false;
            };
            let Reverse(state) = entry.state;
            if self.candidates[state].peek() != Some(&entry.head) {
                continue; // superseded by a better head
            }
            let Some(candidate) = self.candidates[state].pop() else {
                continue;
            };
            if let Some(&next) = self.candidates[state].peek() {
                let key = self.key(state, next.probability.into_inner());
                self.frontier.push(FrontierEntry {
                    key,
                    head: next,
                    state: Reverse(state),
                });
            }

            let Reverse(via) = candidate.via;
            let Reverse(hops) = candidate.hops;
            let id = self.push_record(PathRecord {
                state,
                predecessor: Some(via),
                probability: candidate.probability.into_inner(),
                hops,
            });
            self.stats.steps += 1;
            self.expand(view, id, false);
            return true;
        }
    }

    /// Queues the one-edge extensions of record `id`. For a rank-1 record the
    /// extension that is itself the rank-1 path of the next state is skipped.
    fn expand(&mut self, view: &TargetedView<'_>, id: RecordId, skip_tree_edges: bool) {
        let record = self.records[id];
        for t in view.successors(record.state) {
            let next = t.state;
            if self.completion[next] <= 0.0 {
                continue;
            }
            if skip_tree_edges {
                let first = self.ranked[next].first().map(|&r| self.records[r].predecessor);
                if first == Some(Some(id)) {
                    continue;
                }
            }
            if self.chain(id).any(|r| r.state == next) {
                self.stats.discarded += 1;
                continue;
            }
            self.push_candidate(
                next,
                Candidate {
                    probability: OrderedFloat(record.probability * t.probability),
                    hops: Reverse(record.hops + 1),
                    via_state: Reverse(record.state),
                    via: Reverse(id),
                },
            );
        }
    }

    fn push_candidate(&mut self, state: StateId, candidate: Candidate) {
        let becomes_head = self.candidates[state]
            .peek()
            .map_or(true, |head| candidate > *head);
        self.candidates[state].push(candidate);
        if becomes_head {
            let key = self.key(state, candidate.probability.into_inner());
            self.frontier.push(FrontierEntry {
                key,
                head: candidate,
                state: Reverse(state),
            });
        }
    }

    fn push_record(&mut self, record: PathRecord) -> RecordId {
        let id = self.records.len();
        self.ranked[record.state].push(id);
        self.records.push(record);
        self.stats.records += 1;
        id
    }
}

/// Iterator over the records of one path, from its last state back to the initial state.
pub(crate) struct Chain<'e> {
    engine: &'e PathEngine,
    next: Option<RecordId>,
}

impl<'e> Iterator for Chain<'e> {
    type Item = &'e PathRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.engine.record(self.next?);
        self.next = record.predecessor;
        Some(record)
    }
}
