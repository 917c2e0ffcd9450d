//! Scanner Error Types

use crate::core::error_handling::ContextualError;
use crate::storage::StorageError;
use std::path::PathBuf;

/// Errors surfaced by the scan workflow
///
/// Remote failures are not here: they arrive as a rejected submission or a
/// missing report.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The file to scan could not be opened, inspected or read
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("You haven't selected a file yet!")]
    NoFileSelected,

    #[error("You haven't set your API key yet!")]
    MissingCredential,

    #[error("An upload is already in progress")]
    UploadInProgress,

    /// Local state could not be written
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ScanError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ContextualError for ScanError {
    fn is_user_actionable(&self) -> bool {
        match self {
            ScanError::NoFileSelected => true,
            ScanError::MissingCredential => true,
            ScanError::UploadInProgress => true,
            ScanError::Io { .. } => false,
            ScanError::Storage(e) => e.is_user_actionable(),
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ScanError::NoFileSelected => Some("You haven't selected a file yet!"),
            ScanError::MissingCredential => Some("You haven't set your API key yet!"),
            ScanError::UploadInProgress => Some("An upload is already in progress"),
            ScanError::Io { .. } => None,
            ScanError::Storage(e) => e.user_message(),
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
