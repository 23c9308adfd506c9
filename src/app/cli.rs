use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Ranks the most probable loop-free paths into a target state of an explicit DTMC.", long_about = None)]
pub struct Cli {
    /// Explicit transition file, one `<src> <dst> <prob>` triple per line
    pub model: PathBuf,

    /// Target state, or a comma-separated group of target states
    #[clap(short, long, value_delimiter = ',', required = true)]
    pub target: Vec<usize>,

    /// Initial state of every path
    #[clap(short, long, default_value_t = 0)]
    pub initial: usize,

    /// Number of paths to report
    #[clap(short = 'k', long = "paths", default_value_t = 10)]
    pub paths: usize,

    /// Also report the union of all states on the reported paths
    #[clap(long)]
    pub states: bool,

    /// Render the report as JSON
    #[clap(long)]
    pub json: bool,

    /// Write the report to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose log file
    #[clap(long, default_value = "probable-paths.log")]
    pub log_file: PathBuf,

    /// Log engine-level events to the verbose log
    #[clap(long)]
    pub debug: bool,

    /// Suppress verbose output, only printing the report or errors.
    #[clap(short, long)]
    pub quiet: bool,
}
