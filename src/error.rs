//! Error type shared by every fallible logger operation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or installing a logger.
#[derive(Debug, Error)]
pub enum LogError {
    /// The file logger's destination could not be opened for appending.
    #[error("Failed to open log file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
    #[error("Logger already initialized")]
    AlreadyInitialized,
}
