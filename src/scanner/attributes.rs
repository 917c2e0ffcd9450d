//! Selected file attributes
//!
//! Pure filesystem metadata; no network or persistence involved.

use super::error::{ScanError, ScanResult};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttributes {
    pub name: String,
    /// Extension without the leading dot; empty when the file has none
    pub extension: String,
    pub size_bytes: u64,
}

impl FileAttributes {
    /// Whole kilobytes, rounded down
    pub fn size_kb(&self) -> u64 {
        self.size_bytes / 1024
    }
}

/// Inspect a file that is about to be scanned
pub async fn read_attributes(path: &Path) -> ScanResult<FileAttributes> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ScanError::io(path, e))?;

    if !metadata.is_file() {
        return Err(ScanError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }

    Ok(FileAttributes {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        extension: path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size_bytes: metadata.len(),
    })
}
