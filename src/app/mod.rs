mod cli;
mod error;
mod file_handler;
mod orchestrator;
mod processing;
mod report;

pub use cli::Cli;
pub use orchestrator::run_app;
