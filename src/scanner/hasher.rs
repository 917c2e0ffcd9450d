//! Content hashing
//!
//! Files are identified remotely by their SHA-256 digest. Hashing streams the
//! file through a fixed buffer so memory use does not grow with file size.

use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Read buffer size for streaming hashes
pub const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Lowercase hex SHA-256 of a file's content
pub async fn hash_file(path: &Path) -> std::io::Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

    loop {
        let read = file.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Lowercase hex SHA-256 of an in-memory buffer
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
