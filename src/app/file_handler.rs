//! File system helpers for the application: validating the model path and
//! writing the rendered report.

use std::fs::OpenOptions;
use std::io::{BufWriter, Error as IoError, Write};
use std::path::Path;

use super::error::AppError;
use probable_paths::verbose_eprintln;

/// Checks that `model_path` points to an existing file and returns its stem,
/// used as the model name in reports.
///
/// # Errors
/// Returns `AppError::InvalidPath` if the path does not exist, is not a file,
/// or has no UTF-8 file stem.
pub fn validate_model_file(model_path: &Path, quiet_mode: bool) -> Result<String, AppError> {
    if !model_path.exists() {
        let error_msg = format!("File not found: {}", model_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    if !model_path.is_file() {
        let error_msg = format!("Path is not a file: {}", model_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }

    model_path
        .file_stem()
        .and_then(|os_str| os_str.to_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            let error_msg = format!(
                "Could not determine model name from file: {}",
                model_path.display()
            );
            verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
            AppError::InvalidPath(error_msg)
        })
}

/// Writes string content to a file, creating or truncating it.
///
/// # Errors
/// Returns an `IoError` if opening, writing or flushing fails.
pub fn write_content_to_file(file_path: &Path, content: &str) -> Result<(), IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?; // callers read the file right after
    Ok(())
}
