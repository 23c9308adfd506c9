mod common;

use std::thread;

use common::{assert_close, path_probability, retransmission};
use probable_paths::graph::TransitionGraph;
use probable_paths::ksp::{KspError, ShortestPathsGenerator, Target};

// Three chunks, one retry each, 10% loss:
// states 0/1 send chunk 0, 2/3 chunk 1, 4/5 chunk 2, 6 is "failed", 7 "done".

#[test]
fn best_path_into_failure() {
    let model = retransmission(3, 1, 0.1);
    let mut spg = ShortestPathsGenerator::for_state(&model.graph, 0, model.failed).unwrap();

    assert_close(spg.get_distance(1).unwrap(), 0.01);
    assert_eq!(spg.get_path_as_list(1).unwrap(), vec![6, 1, 0]);
    assert_eq!(spg.stats().steps, 0);
}

#[test]
fn ranks_all_failure_paths() {
    let model = retransmission(3, 1, 0.1);
    let mut spg = ShortestPathsGenerator::for_state(&model.graph, 0, model.failed).unwrap();

    let expected = [0.01, 0.009, 0.0081, 0.0009, 0.00081, 0.00081, 0.000081];
    for (i, &p) in expected.iter().enumerate() {
        assert_close(spg.get_distance(i + 1).unwrap(), p);
    }
    assert_eq!(spg.get_path_as_list(2).unwrap(), vec![6, 3, 2, 0]);
    assert_eq!(spg.get_path_as_list(3).unwrap(), vec![6, 5, 4, 2, 0]);
    assert_eq!(spg.get_path_as_list(7).unwrap(), vec![6, 5, 4, 3, 2, 1, 0]);

    let mut tied = vec![spg.get_path_as_list(5).unwrap(), spg.get_path_as_list(6).unwrap()];
    tied.sort();
    assert_eq!(tied, vec![vec![6, 5, 4, 2, 1, 0], vec![6, 5, 4, 3, 2, 0]]);

    assert_eq!(
        spg.get_distance(8),
        Err(KspError::RankExceedsPathCount {
            requested: 8,
            available: 7
        })
    );
}

#[test]
fn reentry_after_larger_rank() {
    let model = retransmission(3, 1, 0.1);
    let mut spg = ShortestPathsGenerator::for_state(&model.graph, 0, model.done).unwrap();

    assert_close(spg.get_distance(8).unwrap(), 0.1 * 0.9 * 0.1 * 0.9 * 0.1 * 0.9);
    // going back to smaller ranks is served from the memo
    let steps = spg.stats().steps;
    assert_close(spg.get_distance(1).unwrap(), 0.9 * 0.9 * 0.9);
    assert_close(spg.get_distance(4).unwrap(), 0.9 * 0.9 * 0.1 * 0.9);
    assert_eq!(spg.stats().steps, steps);
    assert!(spg.get_distance(9).is_err());
}

#[test]
fn state_with_only_one_path_is_exhausted_at_rank_two() {
    let model = retransmission(3, 1, 0.1);
    let mut spg = ShortestPathsGenerator::for_state(&model.graph, 0, 1).unwrap();

    assert_close(spg.get_distance(1).unwrap(), 0.1);
    assert!(matches!(
        spg.get_distance(2),
        Err(KspError::RankExceedsPathCount {
            requested: 2,
            available: 1
        })
    ));
    // the failure does not disturb later queries
    assert_eq!(spg.get_path_as_list(1).unwrap(), vec![1, 0]);
}

#[test]
fn state_sets_accumulate_over_ranks() {
    let model = retransmission(3, 1, 0.1);
    let mut spg = ShortestPathsGenerator::for_state(&model.graph, 0, model.failed).unwrap();

    let mut ones = |k: usize| spg.get_states(k).unwrap().ones().collect::<Vec<_>>();
    assert_eq!(ones(1), vec![0, 1, 6]);
    assert_eq!(ones(2), vec![0, 1, 2, 3, 6]);
    assert_eq!(ones(3), vec![0, 1, 2, 3, 4, 5, 6]);

    let states = spg.get_states(7).unwrap();
    assert_eq!(states.len(), model.graph.num_states());
    assert!(!states.contains(model.done));
}

#[test]
fn paths_match_their_distances() {
    let model = retransmission(4, 2, 0.2);
    let mut spg = ShortestPathsGenerator::for_state(&model.graph, 0, model.failed).unwrap();

    for k in 1..=40 {
        let path = spg.get_path_as_list(k).unwrap();
        assert_eq!(path.first(), Some(&model.failed));
        assert_eq!(path.last(), Some(&0));
        let mut sorted = path.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), path.len(), "rank {k} repeats a state");
        assert_close(path_probability(&model.graph, &path), spg.get_distance(k).unwrap());
        if k > 1 {
            assert!(spg.get_distance(k - 1).unwrap() >= spg.get_distance(k).unwrap());
        }
    }
}

#[test]
fn loops_are_never_ranked() {
    // 0 <-> 1 with a strong back edge; looping once would beat the direct edge.
    let graph =
        TransitionGraph::from_transitions(3, [(0, 1, 0.5), (1, 0, 0.9), (1, 2, 0.5), (0, 2, 0.01)])
            .unwrap();
    let mut spg = ShortestPathsGenerator::for_state(&graph, 0, 2).unwrap();

    assert_eq!(spg.get_distance(1).unwrap(), 0.25);
    assert_eq!(spg.get_distance(2).unwrap(), 0.01);
    assert_eq!(spg.get_path_as_list(2).unwrap(), vec![2, 0]);
    assert!(spg.get_distance(3).is_err());
}

#[test]
fn group_members_with_equal_probability() {
    let graph = TransitionGraph::from_transitions(
        5,
        [(0, 1, 0.5), (0, 2, 0.5), (1, 3, 0.2), (2, 4, 0.2), (3, 4, 1.0)],
    )
    .unwrap();
    let mut spg = ShortestPathsGenerator::for_group(&graph, 0, &[3, 4]).unwrap();

    assert_eq!(spg.get_distance(1).unwrap(), spg.get_distance(2).unwrap());
    assert_eq!(spg.get_path_as_list(1).unwrap(), vec![3, 1, 0]);
    assert_eq!(spg.get_path_as_list(2).unwrap(), vec![4, 2, 0]);
    // 0 -> 1 -> 3 -> 4 passes member 3 first and is not a separate path
    assert!(spg.get_distance(3).is_err());
    assert_eq!(spg.target_members(), &[3, 4]);
}

#[test]
fn failure_or_success_group() {
    let model = retransmission(3, 1, 0.1);
    let mut group =
        ShortestPathsGenerator::for_group(&model.graph, 0, &[model.failed, model.done]).unwrap();

    let distances = common::all_distances(&mut group);
    assert_eq!(distances.len(), 15);
    assert_close(distances[0], 0.729);
    assert_eq!(group.get_path_as_list(1).unwrap(), vec![7, 4, 2, 0]);
}

#[test]
fn weighted_targets_scale_distances() {
    let model = retransmission(3, 1, 0.1);
    let mut spg =
        ShortestPathsGenerator::new(&model.graph, 0, Target::Weighted(vec![(model.failed, 0.5)]))
            .unwrap();

    assert_close(spg.get_distance(1).unwrap(), 0.005);
    assert_eq!(spg.get_path_as_list(1).unwrap(), vec![6, 1, 0]);
}

#[test]
fn repeated_queries_are_bit_identical() {
    let model = retransmission(4, 2, 0.2);
    let mut spg = ShortestPathsGenerator::for_state(&model.graph, 0, model.failed).unwrap();

    let first = spg.get_distance(25).unwrap();
    let first_path = spg.get_path_as_list(25).unwrap();
    let stats = spg.stats();

    assert_eq!(spg.get_distance(25).unwrap().to_bits(), first.to_bits());
    assert_eq!(spg.get_path_as_list(25).unwrap(), first_path);
    spg.get_states(25).unwrap();
    assert_eq!(spg.stats(), stats);
    assert_eq!(spg.known_path_count(), 25);
}

#[test]
fn independent_generators_share_the_graph() {
    let model = retransmission(4, 2, 0.2);
    let graph = &model.graph;
    let (failed, done) = (model.failed, model.done);

    let (a, b) = thread::scope(|scope| {
        let a = scope.spawn(move || {
            let mut spg = ShortestPathsGenerator::for_state(graph, 0, failed).unwrap();
            spg.get_distance(10).unwrap()
        });
        let b = scope.spawn(move || {
            let mut spg = ShortestPathsGenerator::for_state(graph, 0, done).unwrap();
            spg.get_distance(10).unwrap()
        });
        (a.join().unwrap(), b.join().unwrap())
    });

    let mut spg = ShortestPathsGenerator::for_state(graph, 0, failed).unwrap();
    assert_eq!(spg.get_distance(10).unwrap(), a);
    let mut spg = ShortestPathsGenerator::for_state(graph, 0, done).unwrap();
    assert_eq!(spg.get_distance(10).unwrap(), b);
}

/// 0 -> target (0.5), plus a dense clique that 0 enters easily but that leaks
/// into the target with a tiny probability only.
fn leaky_clique(m: usize) -> TransitionGraph {
    let target = 1;
    let clique = 2..2 + m;
    let mut transitions = vec![(0, target, 0.5)];
    for c in clique.clone() {
        transitions.push((0, c, 0.99));
        transitions.push((c, target, 1e-9));
        for d in clique.clone().filter(|&d| d != c) {
            transitions.push((c, d, 0.99));
        }
    }
    TransitionGraph::from_transitions(2 + m, transitions).unwrap()
}

#[test]
fn second_rank_does_not_enumerate_the_clique() {
    let m = 12;
    let graph = leaky_clique(m);
    let mut spg = ShortestPathsGenerator::for_state(&graph, 0, 1).unwrap();

    assert_eq!(spg.get_distance(1).unwrap(), 0.5);
    assert_eq!(spg.get_distance(2).unwrap(), 0.99 * 1e-9);
    assert_eq!(spg.get_path_as_list(2).unwrap(), vec![1, 2, 0]);

    // one promotion per clique entry into the target, plus the target rank itself
    let stats = spg.stats();
    assert!(stats.steps <= 2 * m, "{stats:?}");
    assert!(stats.seeded <= m + 2, "{stats:?}");
    assert!(stats.records <= 4 * m, "{stats:?}");
}
