//! Process-global verbose log file.
//!
//! Nothing is written until `init_global_logger` has been called; before that
//! every logging call is a no-op. Library code only emits debug lines through
//! `log_debug!`, which additionally requires the debug switch.

use once_cell::sync::Lazy;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Error as IoError, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

// Global static logger instance
static LOGGER: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));
static DEBUG: AtomicBool = AtomicBool::new(false);

/// Initializes the global logger to write to the specified file path.
/// The file is created if missing and truncated otherwise.
pub fn init_global_logger(log_file_path: &Path, debug: bool) -> Result<(), IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file_path)?;
    let writer = BufWriter::new(file);
    match LOGGER.lock() {
        Ok(mut logger_guard) => *logger_guard = Some(writer),
        Err(poisoned) => *poisoned.into_inner() = Some(writer),
    }
    DEBUG.store(debug, Ordering::Relaxed);
    Ok(())
}

/// Returns `true` when debug lines are written.
pub fn is_debug_enabled() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

fn write_line(prefix: &str, args: fmt::Arguments<'_>) {
    if let Ok(mut logger_guard) = LOGGER.lock() {
        if let Some(writer) = logger_guard.as_mut() {
            if writeln!(writer, "{}{}", prefix, args).is_err() {
                // Fallback to stderr if log writing fails
                eprintln!("Fallback (log write failed) {}{}", prefix, args);
            }
        }
        // If logger is None (not initialized), messages are suppressed.
    } else {
        eprintln!("Fallback (logger mutex error) {}{}", prefix, args);
    }
}

/// Writes a verbose message to the global logger.
pub fn log_verbose_message_args(args: fmt::Arguments<'_>) {
    write_line("", args);
}

/// Writes a verbose error message to the global logger.
pub fn log_verbose_error_args(args: fmt::Arguments<'_>) {
    write_line("ERROR: ", args);
}

/// Writes a debug message if the debug switch is on.
pub fn log_debug_args(args: fmt::Arguments<'_>) {
    if is_debug_enabled() {
        write_line("DEBUG: ", args);
    }
}

/// Flushes buffered log output to disk.
pub fn flush_global_logger() -> Result<(), IoError> {
    match LOGGER.lock() {
        Ok(mut logger_guard) => match logger_guard.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        },
        Err(_) => Ok(()),
    }
}

/// Logs a line unless `$quiet` is true.
#[macro_export]
macro_rules! verbose_println {
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            // format_args! avoids allocating a String per message.
            $crate::logger::log_verbose_message_args(format_args!($($arg)*));
        }
    };
}

/// Logs an error line unless `$quiet` is true.
#[macro_export]
macro_rules! verbose_eprintln {
    ($quiet:expr, $($arg:tt)*) => {
        if !$quiet {
            $crate::logger::log_verbose_error_args(format_args!($($arg)*));
        }
    };
}

/// Logs a debug line; the arguments are only formatted when debug is on.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logger::is_debug_enabled() {
            $crate::logger::log_debug_args(format_args!($($arg)*));
        }
    };
}
