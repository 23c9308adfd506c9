use fixedbitset::FixedBitSet;

use super::distance::DistanceMap;
use super::engine::{EngineStats, PathEngine, RecordId};
use super::error::KspError;
use super::materialize::{self, OrderedStateList, RankedPath};
use super::target::{Target, TargetedView};
use crate::graph::{StateId, TransitionGraph};
use crate::log_debug;

/// Lazily built search state: computed on the first query, kept afterwards.
#[derive(Debug)]
struct Search {
    distances: DistanceMap,
    engine: PathEngine,
}

impl Search {
    fn new(view: &TargetedView<'_>, initial: StateId) -> Self {
        let distances = DistanceMap::compute(view, initial);
        log_debug!(
            "distance map from state {}: {} reachable states, best target probability {} (cost {})",
            initial,
            distances.settle_order().len(),
            distances.probability(view.sink()),
            distances.cost(view.sink())
        );
        let engine = PathEngine::new(view, &distances);
        Self { distances, engine }
    }
}

/// Answers "k-th most probable loop-free path" queries for one fixed
/// (graph, initial state, target) binding.
///
/// All queries may be issued in any order and repeated freely. Everything
/// computed for one query is kept and reused by later ones; a failed query
/// leaves the already computed ranks intact.
///
/// Queries take `&mut self` because they grow the memo. Share one generator
/// between threads behind a `Mutex`; independent generators over the same
/// graph need no coordination.
#[derive(Debug)]
pub struct ShortestPathsGenerator<'g> {
    view: TargetedView<'g>,
    initial: StateId,
    search: Option<Search>,
}

impl<'g> ShortestPathsGenerator<'g> {
    /// Binds `graph`, `initial` and `target`.
    ///
    /// # Errors
    /// * `KspError::InvalidIndex` if the initial state or a target state is out of range.
    /// * `KspError::Configuration` for an empty group or an exit probability outside `(0, 1]`.
    pub fn new(
        graph: &'g TransitionGraph,
        initial: StateId,
        target: impl Into<Target>,
    ) -> Result<Self, KspError> {
        graph.check_index(initial)?;
        let view = TargetedView::bind(graph, &target.into())?;
        Ok(Self {
            view,
            initial,
            search: None,
        })
    }

    /// Paths into the single state `target`.
    pub fn for_state(
        graph: &'g TransitionGraph,
        initial: StateId,
        target: StateId,
    ) -> Result<Self, KspError> {
        Self::new(graph, initial, Target::State(target))
    }

    /// Paths into whichever member of `targets` is reached first.
    pub fn for_group(
        graph: &'g TransitionGraph,
        initial: StateId,
        targets: &[StateId],
    ) -> Result<Self, KspError> {
        Self::new(graph, initial, Target::Group(targets.to_vec()))
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// The physical target states, sorted.
    pub fn target_members(&self) -> &[StateId] {
        self.view.members()
    }

    pub fn graph(&self) -> &'g TransitionGraph {
        self.view.graph()
    }

    /// Probability of the k-th most probable path.
    pub fn get_distance(&mut self, k: usize) -> Result<f64, KspError> {
        let (engine, _, id) = self.materialize_rank(k)?;
        Ok(engine.record(id).probability)
    }

    /// Every state visited by any of the paths of rank 1 to k.
    pub fn get_states(&mut self, k: usize) -> Result<FixedBitSet, KspError> {
        let (engine, view, _) = self.materialize_rank(k)?;
        let mut states = FixedBitSet::with_capacity(view.graph().num_states());
        for rank in 1..=k {
            if let Some(id) = engine.ranked(view.sink(), rank) {
                materialize::mark_states(engine, view, id, &mut states);
            }
        }
        Ok(states)
    }

    /// States of the k-th most probable path, target first and initial state last.
    pub fn get_path_as_list(&mut self, k: usize) -> Result<OrderedStateList, KspError> {
        let (engine, view, id) = self.materialize_rank(k)?;
        Ok(materialize::path_as_list(engine, view, id))
    }

    /// Rank, probability and states of the k-th most probable path.
    pub fn get_path(&mut self, k: usize) -> Result<RankedPath, KspError> {
        let (engine, view, id) = self.materialize_rank(k)?;
        Ok(materialize::ranked_path(engine, view, k, id))
    }

    /// Iterates the paths from rank 1 on, ending quietly once all loop-free
    /// paths have been produced.
    pub fn ranked_paths(&mut self) -> RankedPaths<'_, 'g> {
        RankedPaths {
            generator: self,
            next_rank: 1,
            done: false,
        }
    }

    /// Number of paths into the target computed so far.
    pub fn known_path_count(&self) -> usize {
        self.search
            .as_ref()
            .map_or(0, |s| s.engine.rank_count(self.view.sink()))
    }

    pub fn stats(&self) -> EngineStats {
        self.search
            .as_ref()
            .map(|s| s.engine.stats())
            .unwrap_or_default()
    }

    /// Makes sure rank `k` exists and hands out the engine, the view and the
    /// record of that rank.
    fn materialize_rank(
        &mut self,
        k: usize,
    ) -> Result<(&PathEngine, &TargetedView<'g>, RecordId), KspError> {
        if k == 0 {
            return Err(KspError::Configuration(
                "path ranks start at 1".to_string(),
            ));
        }
        let view = &self.view;
        let initial = self.initial;
        let search = self
            .search
            .get_or_insert_with(|| Search::new(view, initial));
        if !search.distances.is_reachable(view.sink()) {
            return Err(KspError::UnreachableTarget { initial });
        }
        let id = search
            .engine
            .extend_to(view, view.sink(), k)
            .map_err(|available| KspError::RankExceedsPathCount {
                requested: k,
                available,
            })?;
        Ok((&search.engine, view, id))
    }
}

/// Iterator returned by `ShortestPathsGenerator::ranked_paths`.
pub struct RankedPaths<'a, 'g> {
    generator: &'a mut ShortestPathsGenerator<'g>,
    next_rank: usize,
    done: bool,
}

impl Iterator for RankedPaths<'_, '_> {
    type Item = Result<RankedPath, KspError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.generator.get_path(self.next_rank) {
            Ok(path) => {
                self.next_rank += 1;
                Some(Ok(path))
            }
            Err(KspError::RankExceedsPathCount { .. }) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
