//! Scanner API
//!
//! Public surface of the scan workflow, consolidating the exports the app
//! layer and integration tests need.

// Workflow coordination
pub use crate::scanner::orchestrator::ScanOrchestrator;

// Error handling
pub use crate::scanner::error::{ScanError, ScanResult};

// Hashing and file inspection
pub use crate::scanner::attributes::{read_attributes, FileAttributes};
pub use crate::scanner::hasher::{hash_bytes, hash_file};

// Core data types
pub use crate::scanner::types::{ScanOutcome, ScanState, UploadRoute, LARGE_FILE_THRESHOLD};
