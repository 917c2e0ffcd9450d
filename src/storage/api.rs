//! Storage API
//!
//! Public surface of the storage module for the app layer and integration tests.

pub use crate::storage::credential::CredentialStore;
pub use crate::storage::error::{StorageError, StorageResult};
pub use crate::storage::history::ScanHistoryStore;
pub use crate::storage::paths::{
    StorageLayout, APP_DIR_NAME, CREDENTIAL_FILE_NAME, HISTORY_FILE_NAME,
};
