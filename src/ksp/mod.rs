// distance module
mod distance;
// engine module
mod engine;
// error module
mod error;
// generator module
mod generator;
// materialize module
mod materialize;
// target module
mod target;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the ksp modules.
//─────────────────────────────────────────────────────────────────────────────
pub use engine::EngineStats;
pub use error::KspError;
pub use generator::{RankedPaths, ShortestPathsGenerator};
pub use materialize::{OrderedStateList, RankedPath};
pub use target::Target;

/// Set of physical states, indexed by state id.
pub type StateSet = fixedbitset::FixedBitSet;
