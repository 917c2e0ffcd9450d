//! Service Error Types
//!
//! These never reach the orchestrator: the client logs them and collapses
//! them into a failed submission or a missing report.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to create HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: network request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation}: HTTP {status} - {reason}")]
    Status {
        operation: &'static str,
        status: u16,
        reason: String,
    },

    #[error("{operation}: unexpected response payload: {source}")]
    Payload {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {path} for upload: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl crate::core::error_handling::ContextualError for ServiceError {
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for remote service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
