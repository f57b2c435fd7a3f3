//! File-backed tracing setup.
//!
//! The terminal belongs to the TUI, so logs go to a file. Follow them with
//! `tail -f ~/.local/state/postboard/postboard.log` in another terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Why logging could not be set up.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory could not be created.
    #[error("Cannot create log directory {path:?}: {source}")]
    DirectoryCreation {
        /// Directory that was attempted.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Log path has no usable file name
    #[error("Log path {0:?} does not name a file")]
    InvalidPath(PathBuf),

    /// A global subscriber is already installed.
    #[error("A tracing subscriber is already installed")]
    SubscriberAlreadySet,
}

/// Split `log_path` into the directory to create and the file name.
///
/// A bare file name resolves against the current directory.
fn split_log_path(log_path: &Path) -> Result<(PathBuf, &str), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, file_name))
}

/// Build the level filter from a `RUST_LOG`-style directive string.
fn build_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global subscriber writing plain text to `log_path`.
///
/// Respects `RUST_LOG`, defaulting to `info`. Creates the log directory if
/// it doesn't exist.
///
/// # Errors
///
/// Returns [`LoggingError`] if the path has no file name, the directory
/// cannot be created, or a subscriber is already installed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let (directory, file_name) = split_log_path(log_path)?;

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&directory, file_name);
    let env_filter = build_filter(std::env::var("RUST_LOG").ok().as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
