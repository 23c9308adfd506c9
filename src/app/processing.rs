//! Core steps of one run: loading the model and collecting the ranked paths.

use std::path::Path;

use super::error::AppError;
use super::report::Report;
use probable_paths::graph::TransitionGraph;
use probable_paths::ksp::{KspError, ShortestPathsGenerator, Target};
use probable_paths::loader;
use probable_paths::{verbose_eprintln, verbose_println};

/// Loads the explicit transition graph stored at `model_path`.
pub fn load_model(model_path: &Path, quiet_mode: bool) -> Result<TransitionGraph, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 1] Loading transition graph...");
    let model_path_str = model_path
        .to_str()
        .ok_or_else(|| AppError::InvalidPath(model_path.display().to_string()))?;

    let graph = loader::load_graph(model_path_str)?;
    verbose_println!(
        quiet_mode,
        "   => {} states, {} transitions.",
        graph.num_states(),
        graph.num_transitions()
    );
    Ok(graph)
}

/// Queries ranks `1..=requested` and assembles the report.
///
/// Running out of loop-free paths ends the listing early and is recorded in
/// the report; every other query error aborts the run.
pub fn collect_report(
    graph: &TransitionGraph,
    model_name: &str,
    initial: usize,
    targets: &[usize],
    requested: usize,
    with_states: bool,
    quiet_mode: bool,
) -> Result<Report, AppError> {
    if requested == 0 {
        return Err(AppError::InvalidArgument(
            "at least one path must be requested".to_string(),
        ));
    }
    let target = match targets {
        [single] => Target::State(*single),
        group => Target::Group(group.to_vec()),
    };

    verbose_println!(
        quiet_mode,
        "[STEP 2] Binding initial state {} and target {:?}...",
        initial,
        target
    );
    let mut generator = ShortestPathsGenerator::new(graph, initial, target)?;

    verbose_println!(quiet_mode, "[STEP 3] Ranking up to {} paths...", requested);
    let mut paths = Vec::with_capacity(requested);
    let mut exhausted = false;
    for rank in 1..=requested {
        match generator.get_path(rank) {
            Ok(path) => {
                verbose_println!(
                    quiet_mode,
                    "   #{}: p = {:e}, {} states",
                    rank,
                    path.probability,
                    path.states.len()
                );
                paths.push(path);
            }
            Err(KspError::RankExceedsPathCount { available, .. }) => {
                verbose_println!(
                    quiet_mode,
                    "   => only {} loop-free paths exist.",
                    available
                );
                exhausted = true;
                break;
            }
            Err(e) => {
                verbose_eprintln!(quiet_mode, "[ERROR] Query for rank {} failed: {}", rank, e);
                return Err(e.into());
            }
        }
    }

    let states: Option<Vec<usize>> = if with_states && !paths.is_empty() {
        Some(generator.get_states(paths.len())?.ones().collect())
    } else {
        None
    };

    let stats = generator.stats();
    verbose_println!(
        quiet_mode,
        "   => engine: {} records, {} seeded, {} promotions, {} looping candidates discarded.",
        stats.records,
        stats.seeded,
        stats.steps,
        stats.discarded
    );

    Ok(Report {
        model: model_name.to_string(),
        initial,
        targets: generator.target_members().to_vec(),
        requested,
        paths,
        exhausted,
        states,
    })
}
