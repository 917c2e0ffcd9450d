//! Scan Workflow
//!
//! Content hashing, file selection and the orchestrator that ties the local
//! stores to the remote analysis service.
//!
//! ## Core Features
//!
//! - **ScanOrchestrator**: one scan at a time, with re-entrant uploads refused
//! - **Size gating**: files of 32 000 bytes or more use the large-file upload path
//! - **Streaming SHA-256**: bounded memory regardless of file size
//! - **History recording**: only accepted submissions are written to history

pub mod api;
pub mod attributes;
pub mod error;
pub mod hasher;
pub mod orchestrator;
pub mod types;

pub use attributes::FileAttributes;
pub use error::{ScanError, ScanResult};
pub use orchestrator::ScanOrchestrator;
pub use types::{ScanOutcome, ScanState, UploadRoute, LARGE_FILE_THRESHOLD};

#[cfg(test)]
mod tests;
