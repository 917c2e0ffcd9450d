//! Storage root resolution
//!
//! All persisted state lives in flat files under a single per-user directory.

use super::error::{StorageError, StorageResult};
use std::path::{Path, PathBuf};

/// Directory name under the platform data directory
pub const APP_DIR_NAME: &str = "VirustotalDesktop";
/// File holding the raw API key
pub const CREDENTIAL_FILE_NAME: &str = "vt_ak_dat.dat";
/// Newline-delimited list of submitted hashes
pub const HISTORY_FILE_NAME: &str = "scan_history.txt";

/// Locations of the persisted files for one storage root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    /// Use an explicit storage root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default per-user location, e.g. `~/.local/share/VirustotalDesktop`
    pub fn default_location() -> StorageResult<Self> {
        dirs::data_dir()
            .map(|dir| Self::new(dir.join(APP_DIR_NAME)))
            .ok_or(StorageError::NoDataDir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn credential_file(&self) -> PathBuf {
        self.root.join(CREDENTIAL_FILE_NAME)
    }

    pub fn history_file(&self) -> PathBuf {
        self.root.join(HISTORY_FILE_NAME)
    }

    /// Create the storage root if it does not exist yet
    pub(crate) fn ensure_root(&self) -> StorageResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|source| StorageError::CreateDir {
            path: self.root.clone(),
            source,
        })
    }
}
