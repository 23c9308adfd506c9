//! Single-source best-probability distances over a `TargetedView`.
//!
//! Maximizing a product of probabilities orders paths exactly like minimizing
//! the sum of `-ln(p)` edge weights, so this is Dijkstra's algorithm run on
//! products with a max-priority queue. Products are kept as is, which makes
//! the reported probabilities bit-identical to multiplying the edge
//! probabilities along the path.
//!
//! `best_completion` runs the same search backward from the sink and gives,
//! for every state, the probability of its best continuation into the target.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use super::target::TargetedView;
use crate::graph::StateId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct QueueEntry {
    probability: OrderedFloat<f64>,
    hops: Reverse<usize>,
    state: Reverse<StateId>,
}

#[derive(Clone, Copy, Debug)]
struct Label {
    probability: f64,
    hops: usize,
    predecessor: Option<StateId>,
}

/// Best distance and predecessor of every state reachable from the initial state.
#[derive(Clone, Debug)]
pub(crate) struct DistanceMap {
    labels: Vec<Option<Label>>,
    settle_order: Vec<StateId>,
}

impl DistanceMap {
    pub(crate) fn compute(view: &TargetedView<'_>, initial: StateId) -> Self {
        let n = view.num_states();
        let mut labels: Vec<Option<Label>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut settle_order = Vec::new();
        let mut queue = BinaryHeap::new();

        labels[initial] = Some(Label {
            probability: 1.0,
            hops: 0,
            predecessor: None,
        });
        queue.push(QueueEntry {
            probability: OrderedFloat(1.0),
            hops: Reverse(0),
            state: Reverse(initial),
        });

        while let Some(QueueEntry { state: Reverse(current), .. }) = queue.pop() {
            if settled[current] {
                continue;
            }
            settled[current] = true;
            settle_order.push(current);

            let Some(label) = labels[current] else {
                continue;
            };
            for t in view.successors(current) {
                if settled[t.state] {
                    continue;
                }
                let candidate = Label {
                    probability: label.probability * t.probability,
                    hops: label.hops + 1,
                    predecessor: Some(current),
                };
                let improves = match labels[t.state] {
                    None => true,
                    Some(existing) => {
                        let by_rank = (
                            OrderedFloat(candidate.probability),
                            Reverse(candidate.hops),
                            Reverse(candidate.predecessor),
                        );
                        by_rank
                            > (
                                OrderedFloat(existing.probability),
                                Reverse(existing.hops),
                                Reverse(existing.predecessor),
                            )
                    }
                };
                if improves {
                    labels[t.state] = Some(candidate);
                    queue.push(QueueEntry {
                        probability: OrderedFloat(candidate.probability),
                        hops: Reverse(candidate.hops),
                        state: Reverse(t.state),
                    });
                }
            }
        }

        Self {
            labels,
            settle_order,
        }
    }

    pub(crate) fn is_reachable(&self, state: StateId) -> bool {
        self.labels.get(state).is_some_and(Option::is_some)
    }

    /// Best path probability, `0.0` for unreachable states.
    pub(crate) fn probability(&self, state: StateId) -> f64 {
        self.labels[state].map_or(0.0, |l| l.probability)
    }

    /// Additive `-ln` weight of the best path, `+inf` for unreachable states.
    pub(crate) fn cost(&self, state: StateId) -> f64 {
        -self.probability(state).ln()
    }

    pub(crate) fn hops(&self, state: StateId) -> usize {
        self.labels[state].map_or(0, |l| l.hops)
    }

    pub(crate) fn predecessor(&self, state: StateId) -> Option<StateId> {
        self.labels[state].and_then(|l| l.predecessor)
    }

    /// Reachable states in the order they were settled; every state appears
    /// after its predecessor.
    pub(crate) fn settle_order(&self) -> &[StateId] {
        &self.settle_order
    }
}

/// Best probability of reaching the sink from each state of `view`; `0.0` for
/// states that cannot reach it. The sink itself gets `1.0`.
pub(crate) fn best_completion(view: &TargetedView<'_>) -> Vec<f64> {
    let n = view.num_states();
    let sink = view.sink();
    let mut best = vec![0.0; n];
    let mut settled = vec![false; n];
    let mut queue = BinaryHeap::new();

    best[sink] = 1.0;
    queue.push((OrderedFloat(1.0), Reverse(sink)));

    while let Some((OrderedFloat(probability), Reverse(current))) = queue.pop() {
        if settled[current] {
            continue;
        }
        settled[current] = true;

        let mut relax = |state: StateId, candidate: f64| {
            if !settled[state] && candidate > best[state] {
                best[state] = candidate;
                queue.push((OrderedFloat(candidate), Reverse(state)));
            }
        };
        if current == sink {
            for &member in view.members() {
                if let Some(exit) = view.exit_probability(member) {
                    relax(member, probability * exit);
                }
            }
        } else {
            for t in view.graph().predecessors_of(current) {
                // a member's only edge in the view is the one into the sink
                if !view.is_member(t.state) {
                    relax(t.state, probability * t.probability);
                }
            }
        }
    }
    best
}
