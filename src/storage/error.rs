//! Storage Error Types

use std::path::PathBuf;

/// Errors raised when persisting local state
///
/// Reads never produce these: a missing or unreadable file is treated as an
/// empty value by the stores.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to create storage directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No per-user data directory is available on this platform")]
    NoDataDir,
}

impl crate::core::error_handling::ContextualError for StorageError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, StorageError::NoDataDir)
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            StorageError::NoDataDir => {
                Some("No per-user data directory is available; pass --data-dir to choose one")
            }
            _ => None,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
