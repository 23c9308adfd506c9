// error module
mod error;
// loader module
#[allow(clippy::module_inception)]
mod loader;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the loader modules.
//─────────────────────────────────────────────────────────────────────────────
pub use error::LoaderError;
pub use loader::{load_graph, parse_graph};
