//! Scanner Types
//!
//! Shared types for the scan workflow.

use crate::service::SubmissionOutcome;
use std::path::PathBuf;

/// Files at or above this size go through the large-file upload path.
///
/// Far below the service's actual 32 MB limit for the regular endpoint, but
/// the boundary is part of observable behaviour and is kept as-is.
pub const LARGE_FILE_THRESHOLD: u64 = 32_000;

/// Upload mechanism chosen for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum UploadRoute {
    Small,
    Large,
}

impl UploadRoute {
    pub fn for_size(size_bytes: u64) -> Self {
        if size_bytes >= LARGE_FILE_THRESHOLD {
            UploadRoute::Large
        } else {
            UploadRoute::Small
        }
    }
}

/// Orchestrator state for the current scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Idle,
    Selected(PathBuf),
    Uploading(PathBuf),
}

/// Result of one upload attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub hash: String,
    pub route: UploadRoute,
    pub size_bytes: u64,
    pub submission: SubmissionOutcome,
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        self.submission.success
    }
}
