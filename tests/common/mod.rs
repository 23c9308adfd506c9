#![allow(dead_code)]

use probable_paths::graph::{StateId, TransitionGraph};
use probable_paths::ksp::{KspError, ShortestPathsGenerator};

/// Every loop-free path from `initial` that ends at the first member of
/// `members` it reaches, as (probability, states target-first), most probable
/// first.
pub fn brute_force_paths(
    graph: &TransitionGraph,
    initial: StateId,
    members: &[StateId],
) -> Vec<(f64, Vec<StateId>)> {
    fn walk(
        graph: &TransitionGraph,
        members: &[StateId],
        path: &mut Vec<StateId>,
        probability: f64,
        out: &mut Vec<(f64, Vec<StateId>)>,
    ) {
        let Some(&current) = path.last() else {
            return;
        };
        if members.contains(&current) {
            out.push((probability, path.iter().rev().copied().collect()));
            return;
        }
        for t in graph.successors(current).unwrap() {
            if path.contains(&t.state) {
                continue;
            }
            path.push(t.state);
            walk(graph, members, path, probability * t.probability, out);
            path.pop();
        }
    }

    let mut out = Vec::new();
    walk(graph, members, &mut vec![initial], 1.0, &mut out);
    out.sort_by(|a, b| b.0.total_cmp(&a.0));
    out
}

/// All distances a generator produces, rank 1 first; empty for an unreachable target.
pub fn all_distances(spg: &mut ShortestPathsGenerator<'_>) -> Vec<f64> {
    let mut distances = Vec::new();
    for path in spg.ranked_paths() {
        match path {
            Ok(path) => distances.push(path.probability),
            Err(KspError::UnreachableTarget { .. }) => return Vec::new(),
            Err(other) => panic!("unexpected query error: {other}"),
        }
    }
    distances
}

/// Product of the transition probabilities along a target-first path.
pub fn path_probability(graph: &TransitionGraph, path: &[StateId]) -> f64 {
    path.iter()
        .rev()
        .zip(path.iter().rev().skip(1))
        .map(|(&from, &to)| graph.probability(from, to).expect("path uses a missing edge"))
        .fold(1.0, |acc, p| acc * p)
}

pub fn assert_close(actual: f64, expected: f64) {
    let scale = actual.abs().max(expected.abs()).max(f64::MIN_POSITIVE);
    assert!(
        (actual - expected).abs() / scale < 1e-12,
        "expected {expected}, got {actual}"
    );
}

/// Bounded retransmission of `chunks` chunks: every chunk is retried after a
/// loss until `max_retries` retries are used up, after which the transfer
/// fails.
///
/// State `chunk * (max_retries + 1) + retry` sends `chunk` after `retry`
/// retries; the two states after those are "failed" and "done".
pub struct Retransmission {
    pub graph: TransitionGraph,
    pub failed: StateId,
    pub done: StateId,
}

pub fn retransmission(chunks: usize, max_retries: usize, loss: f64) -> Retransmission {
    let per_chunk = max_retries + 1;
    let failed = chunks * per_chunk;
    let done = failed + 1;
    let state = |chunk: usize, retry: usize| chunk * per_chunk + retry;

    let mut transitions = Vec::new();
    for chunk in 0..chunks {
        for retry in 0..per_chunk {
            let next = if chunk + 1 == chunks {
                done
            } else {
                state(chunk + 1, 0)
            };
            transitions.push((state(chunk, retry), next, 1.0 - loss));
            let lost = if retry == max_retries {
                failed
            } else {
                state(chunk, retry + 1)
            };
            transitions.push((state(chunk, retry), lost, loss));
        }
    }
    Retransmission {
        graph: TransitionGraph::from_transitions(done + 1, transitions).unwrap(),
        failed,
        done,
    }
}
