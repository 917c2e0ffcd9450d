//! API key persistence
//!
//! The whole file content is the key. An empty or missing file means no key
//! has been configured.

use super::error::{StorageError, StorageResult};
use super::paths::StorageLayout;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CredentialStore {
    layout: StorageLayout,
}

impl CredentialStore {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    pub fn path(&self) -> PathBuf {
        self.layout.credential_file()
    }

    /// Overwrite the stored key; an empty token clears it
    ///
    /// The key is written to a sibling temporary file which then replaces the
    /// credential file, so readers see either the old key or the new one.
    pub fn set(&self, token: &str) -> StorageResult<()> {
        self.layout.ensure_root()?;
        let path = self.path();
        tempfile::NamedTempFile::new_in(self.layout.root())
            .and_then(|mut staged| {
                staged.write_all(token.as_bytes())?;
                staged.as_file().sync_all()?;
                staged.persist(&path).map_err(|e| e.error)?;
                Ok(())
            })
            .map_err(|source| StorageError::Write { path, source })?;
        log::info!("API key updated ({} characters)", token.len());
        Ok(())
    }

    /// Stored key, or an empty string when none is available
    pub fn get(&self) -> String {
        let path = self.path();
        match std::fs::read_to_string(&path) {
            Ok(token) => token,
            Err(e) => {
                log::debug!("No API key read from {}: {}", path.display(), e);
                String::new()
            }
        }
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.set("")
    }

    pub fn is_set(&self) -> bool {
        !self.get().is_empty()
    }
}
