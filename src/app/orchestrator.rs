//! Main application orchestrator.
//!
//! Coordinates one run:
//! 1. Initializes logging.
//! 2. Validates the model file and derives the model name.
//! 3. Loads the explicit transition graph.
//! 4. Ranks the requested number of paths via `processing::collect_report`.
//! 5. Renders the report as text or JSON, to stdout or an output file.

use super::cli::Cli;
use super::error::AppError;
use super::file_handler;
use super::processing;
use probable_paths::logger;
use probable_paths::{verbose_eprintln, verbose_println};

/// Runs the main application logic based on parsed command-line arguments.
///
/// # Errors
/// Returns `AppError` for invalid input files, malformed models, failed
/// queries other than running out of paths, and output failures.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    if !quiet_mode {
        if let Err(e) = logger::init_global_logger(&cli.log_file, cli.debug) {
            // The run continues without the verbose log.
            eprintln!(
                "Warning: Failed to initialize verbose logger ({}): {}. Verbose file logging will be unavailable.",
                cli.log_file.display(),
                e
            );
        } else {
            verbose_println!(
                quiet_mode,
                "Verbose logging initialized to {}",
                cli.log_file.display()
            );
        }
    }

    let result = run_queries(&cli);
    if let Err(e) = &result {
        verbose_eprintln!(quiet_mode, "[ERROR] {}", e);
    }

    if !quiet_mode {
        if let Err(e) = logger::flush_global_logger() {
            eprintln!(
                "[WARNING] Failed to perform final flush of {}: {}",
                cli.log_file.display(),
                e
            );
        }
    }
    result
}

fn run_queries(cli: &Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;
    let model_name = file_handler::validate_model_file(&cli.model, quiet_mode)?;

    verbose_println!(
        quiet_mode,
        "\n============================================================"
    );
    verbose_println!(quiet_mode, "Model: {}", cli.model.display());
    verbose_println!(
        quiet_mode,
        "============================================================"
    );

    let graph = processing::load_model(&cli.model, quiet_mode)?;
    let report = processing::collect_report(
        &graph,
        &model_name,
        cli.initial,
        &cli.target,
        cli.paths,
        cli.states,
        quiet_mode,
    )?;

    let rendered = if cli.json {
        report.to_json()?
    } else {
        report.to_text()
    };

    match &cli.output {
        Some(output_path) => {
            file_handler::write_content_to_file(output_path, &rendered)?;
            verbose_println!(
                quiet_mode,
                "\n[INFO] Report written to {}",
                output_path.display()
            );
            if !quiet_mode {
                println!("Report written to {}.", output_path.display());
            }
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
