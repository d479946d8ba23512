//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot derive a save path for {url}: {reason}")]
    InvalidPath { url: String, reason: String },
}

impl StorageError {
    /// Builds a closure that wraps an IO error with the path it happened on
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
