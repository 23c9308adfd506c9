//! K most probable loop-free paths in explicit discrete-time probabilistic
//! transition systems.
//!
//! A `ShortestPathsGenerator` binds a `TransitionGraph`, an initial state and
//! a `Target` (one state or a group of states) and answers "k-th most
//! probable path" queries in any order, reusing all previously computed work.
//!
//! ```
//! use probable_paths::graph::TransitionGraph;
//! use probable_paths::ksp::ShortestPathsGenerator;
//!
//! let graph = TransitionGraph::from_transitions(
//!     3,
//!     [(0, 1, 0.5), (1, 2, 0.5), (0, 2, 0.1)],
//! )?;
//! let mut spg = ShortestPathsGenerator::for_state(&graph, 0, 2)?;
//! assert_eq!(spg.get_distance(1)?, 0.25);
//! assert_eq!(spg.get_path_as_list(2)?, vec![2, 0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod graph;
pub mod ksp;
pub mod loader;
pub mod logger;
