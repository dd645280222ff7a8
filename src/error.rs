//! Custom error types for taskdeck.
//!
//! Storage-layer errors are classified so the shell can report them and keep
//! running; no storage failure is fatal to the process.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for taskdeck operations
#[derive(Error, Debug)]
pub enum TaskdeckError {
    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Persisted task file contains malformed JSON
    #[error("The file '{}' contains invalid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Permission denied on the task file
    #[error("Access to the path '{}' is denied: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Other read/write failure on the task file
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // =========================================================================
    // Store Errors
    // =========================================================================
    /// Task reference outside the valid display-index range
    #[error("Task number {index} does not exist (valid range: 1-{len})")]
    IndexOutOfRange { index: usize, len: usize },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// Console I/O failure (prompt or menu write/read)
    #[error(transparent)]
    Console(#[from] io::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TaskdeckError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a parse error for the given file
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Classify an I/O error against the error taxonomy.
    ///
    /// Permission failures become [`TaskdeckError::Access`]; everything else
    /// becomes [`TaskdeckError::Io`].
    pub fn from_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::Access { path, source }
        } else {
            Self::Io { path, source }
        }
    }

    /// Create an invalid-configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error came from the storage layer.
    ///
    /// Storage errors are reported to the user and degrade gracefully
    /// (empty store on load failure, warning on save failure).
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Access { .. } | Self::Io { .. }
        )
    }
}

/// Type alias for taskdeck results
pub type Result<T> = std::result::Result<T, TaskdeckError>;
