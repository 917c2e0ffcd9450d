//! Scan Orchestrator
//!
//! Coordinates one scan at a time: a file is selected, hashed, uploaded
//! through the size-appropriate path and, if accepted, recorded in history.
//! Report retrieval is a separate stateless action keyed by content hash.
//!
//! ```text
//! Idle --select_file--> Selected --upload--> Uploading --+--> Idle (recorded)
//!  ^                       |                             +--> Idle (failed)
//!  +----clear_selection----+
//! ```

use super::attributes::{read_attributes, FileAttributes};
use super::error::{ScanError, ScanResult};
use super::hasher::hash_file;
use super::types::{ScanOutcome, ScanState, UploadRoute};
use crate::service::{AnalysisReport, AnalysisService};
use crate::storage::{CredentialStore, ScanHistoryStore, StorageLayout};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub struct ScanOrchestrator {
    service: Arc<dyn AnalysisService>,
    credentials: CredentialStore,
    history: ScanHistoryStore,
    state: Mutex<ScanState>,
}

/// Returns the orchestrator to Idle when an upload ends, however it ends
struct UploadGuard<'a> {
    state: &'a Mutex<ScanState>,
}

impl Drop for UploadGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = ScanState::Idle;
    }
}

impl ScanOrchestrator {
    pub fn new(service: Arc<dyn AnalysisService>, layout: StorageLayout) -> Self {
        Self {
            service,
            credentials: CredentialStore::new(layout.clone()),
            history: ScanHistoryStore::new(layout),
            state: Mutex::new(ScanState::Idle),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ScanState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ScanState {
        self.lock_state().clone()
    }

    fn is_uploading(&self) -> bool {
        matches!(*self.lock_state(), ScanState::Uploading(_))
    }

    /// Hold `path` for upload and describe it
    pub async fn select_file(&self, path: impl AsRef<Path>) -> ScanResult<FileAttributes> {
        let path = path.as_ref();
        if self.is_uploading() {
            return Err(ScanError::UploadInProgress);
        }

        let attributes = read_attributes(path).await?;

        let mut state = self.lock_state();
        if matches!(*state, ScanState::Uploading(_)) {
            return Err(ScanError::UploadInProgress);
        }
        *state = ScanState::Selected(path.to_path_buf());
        log::debug!("Selected {} ({} bytes)", path.display(), attributes.size_bytes);

        Ok(attributes)
    }

    /// Drop the current selection
    pub fn clear_selection(&self) -> ScanResult<()> {
        let mut state = self.lock_state();
        if matches!(*state, ScanState::Uploading(_)) {
            return Err(ScanError::UploadInProgress);
        }
        *state = ScanState::Idle;
        Ok(())
    }

    /// Upload the selected file
    ///
    /// A missing API key is reported before anything changes, so the
    /// selection survives. Once the upload starts the orchestrator returns to
    /// Idle whether it succeeds, is rejected, or fails reading the file.
    pub async fn upload(&self) -> ScanResult<ScanOutcome> {
        let token = self.credentials.get();

        let path = {
            let mut state = self.lock_state();
            let path = match &*state {
                ScanState::Uploading(_) => return Err(ScanError::UploadInProgress),
                _ if token.is_empty() => return Err(ScanError::MissingCredential),
                ScanState::Idle => return Err(ScanError::NoFileSelected),
                ScanState::Selected(path) => path.clone(),
            };
            *state = ScanState::Uploading(path.clone());
            path
        };

        let _guard = UploadGuard { state: &self.state };
        self.submit(&token, &path).await
    }

    /// Select `path` and upload it immediately
    pub async fn upload_path(&self, path: impl AsRef<Path>) -> ScanResult<ScanOutcome> {
        self.select_file(path).await?;
        self.upload().await
    }

    async fn submit(&self, token: &str, path: &Path) -> ScanResult<ScanOutcome> {
        let hash = hash_file(path).await.map_err(|e| ScanError::io(path, e))?;
        let size_bytes = tokio::fs::metadata(path)
            .await
            .map_err(|e| ScanError::io(path, e))?
            .len();
        let route = UploadRoute::for_size(size_bytes);

        log::info!(
            "Uploading {} ({} bytes, {} path)",
            path.display(),
            size_bytes,
            route
        );

        let submission = match route {
            UploadRoute::Small => self.service.submit_small(token, path).await,
            UploadRoute::Large => self.service.submit_large(token, path).await,
        };

        if submission.success {
            self.history.append(&hash)?;
            log::info!("Upload accepted; recorded {}", hash);
        } else {
            log::warn!("Upload of {} was not accepted", path.display());
        }

        Ok(ScanOutcome {
            hash,
            route,
            size_bytes,
            submission,
        })
    }

    /// Fetch the latest analysis for a previously submitted hash
    ///
    /// `Ok(None)` means the service had no usable report.
    pub async fn get_report(&self, hash: &str) -> ScanResult<Option<AnalysisReport>> {
        let token = self.credentials.get();
        if token.is_empty() {
            return Err(ScanError::MissingCredential);
        }

        log::info!("Fetching report for {}", hash);
        Ok(self.service.fetch_report(&token, hash).await)
    }

    pub fn get_history(&self) -> Vec<String> {
        self.history.list_all()
    }

    pub fn latest_history_entry(&self) -> Option<String> {
        self.history.latest()
    }

    pub fn clear_history(&self) -> ScanResult<()> {
        Ok(self.history.clear()?)
    }

    pub fn set_credential(&self, token: &str) -> ScanResult<()> {
        Ok(self.credentials.set(token)?)
    }

    pub fn get_credential(&self) -> String {
        self.credentials.get()
    }

    pub fn clear_credential(&self) -> ScanResult<()> {
        Ok(self.credentials.clear()?)
    }

    /// Where the API key is stored, for user feedback
    pub fn credential_path(&self) -> PathBuf {
        self.credentials.path()
    }
}
