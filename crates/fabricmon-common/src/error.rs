//! Error types for pipeline operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. Most parse
//! problems never become errors at all (they degrade per the crate-level
//! failure policy); the variants here cover the conditions that must stop
//! the run or be reported to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations.
pub type FabricResult<T> = Result<T, FabricError>;

/// Errors that can occur during a pipeline run.
#[derive(Debug, Error)]
pub enum FabricError {
    /// Failed to scan the root directory for device dumps.
    #[error("Failed to scan directory '{path}': {source}")]
    ScanDir {
        /// The directory that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Failed to write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        /// The output file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Configuration value failed validation.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl FabricError {
    /// Creates a directory scan error.
    pub fn scan_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ScanDir {
            path: path.into(),
            source,
        }
    }

    /// Creates an output write error.
    pub fn output_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
