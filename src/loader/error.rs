use crate::graph::GraphError;
use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for loading explicit transition files.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Error when reading a file.
    #[error("Failed to read file '{0}': {1}")]
    ReadFile(String, std::io::Error),

    /// A line that is not a header, comment or `<src> <dst> <prob>` triple.
    #[error("{path}:{line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    /// The transitions do not form a valid graph.
    #[error("Invalid transition graph: {0}")]
    Graph(#[from] GraphError),
}
