//! Local State
//!
//! Flat-file persistence for the API key and the scan history. Both stores
//! are single-writer: callers serialize access, which holds because the
//! application runs one flow at a time.

pub mod api;
pub mod credential;
pub mod error;
pub mod history;
pub mod paths;

pub use credential::CredentialStore;
pub use error::{StorageError, StorageResult};
pub use history::ScanHistoryStore;
pub use paths::StorageLayout;
