//! Scan history persistence
//!
//! One content hash per line, in submission order. Duplicates are kept; the
//! file is only ever appended to or truncated.

use super::error::{StorageError, StorageResult};
use super::paths::StorageLayout;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScanHistoryStore {
    layout: StorageLayout,
}

impl ScanHistoryStore {
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    pub fn path(&self) -> PathBuf {
        self.layout.history_file()
    }

    /// Append one hash as a complete line
    pub fn append(&self, hash: &str) -> StorageResult<()> {
        self.layout.ensure_root()?;
        let path = self.path();

        // Single write of the full line so a failure cannot leave half an entry
        std::fs::OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .and_then(|mut file| {
                let line = if ends_mid_line(&mut file)? {
                    format!("\n{}\n", hash)
                } else {
                    format!("{}\n", hash)
                };
                file.write_all(line.as_bytes())
            })
            .map_err(|source| StorageError::Write { path, source })?;

        log::debug!("Recorded {} in scan history", hash);
        Ok(())
    }

    /// All recorded hashes in insertion order
    pub fn list_all(&self) -> Vec<String> {
        let path = self.path();
        match std::fs::read_to_string(&path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                log::debug!("No scan history read from {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Most recently recorded hash
    pub fn latest(&self) -> Option<String> {
        self.list_all().pop()
    }

    /// Truncate the history; the file itself is kept
    pub fn clear(&self) -> StorageResult<()> {
        self.layout.ensure_root()?;
        let path = self.path();
        std::fs::write(&path, "").map_err(|source| StorageError::Write { path, source })?;
        log::info!("Scan history cleared");
        Ok(())
    }
}

/// True when the file has content whose last byte is not a newline
fn ends_mid_line(file: &mut std::fs::File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
