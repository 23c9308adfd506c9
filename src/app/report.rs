//! Report model and its text/JSON renderings.

use std::fmt::Write as FmtWrite;

use probable_paths::ksp::RankedPath;
use serde::Serialize;

/// Everything the application prints for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub model: String,
    pub initial: usize,
    pub targets: Vec<usize>,
    /// Number of paths asked for on the command line.
    pub requested: usize,
    pub paths: Vec<RankedPath>,
    /// `true` if fewer loop-free paths exist than were requested.
    pub exhausted: bool,
    /// Union of the states on all reported paths, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<usize>>,
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(128 + self.paths.len() * 64);
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "Model {}: paths from state {} into {}",
            self.model,
            self.initial,
            format_states(&self.targets)
        );
        for path in &self.paths {
            let _ = writeln!(
                out,
                "  #{:<4} p = {:<24e} {}",
                path.rank,
                path.probability,
                path.states
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(" <- ")
            );
        }
        if self.exhausted {
            let _ = writeln!(
                out,
                "  (only {} loop-free paths exist, {} requested)",
                self.paths.len(),
                self.requested
            );
        }
        if let Some(states) = &self.states {
            let _ = writeln!(
                out,
                "  states on these paths ({}): {}",
                states.len(),
                format_states(states)
            );
        }
        out
    }
}

fn format_states(states: &[usize]) -> String {
    let inner = states
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", inner)
}
