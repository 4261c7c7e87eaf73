//! Error types for obstacle placement

use std::path::PathBuf;
use thiserror::Error;

/// Placement file errors
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The file could not be read or written
    #[error("Placement file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A matrix line is malformed
    #[error("Invalid matrix on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Result type for placement operations
pub type Result<T> = std::result::Result<T, PlacementError>;
