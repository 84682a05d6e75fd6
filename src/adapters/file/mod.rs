//! File-backed adapters.
//!
//! Layout under the configured data directory:
//!
//! ```text
//! {data_dir}/profiles/{user_key}.yaml
//! {data_dir}/insights/{user_key}.yaml
//! {data_dir}/events/{user_key}.jsonl
//! ```
//!
//! `user_key` is the SHA-256 of the user id so arbitrary ids map to safe
//! file names.

mod event_log;
mod insight_store;
mod profile_store;

pub use event_log::FileEventLog;
pub use insight_store::FileInsightStore;
pub use profile_store::FileProfileStore;

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

fn user_key(user_id: &UserId) -> String {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_str().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn user_file(base: &Path, dir: &str, user_id: &UserId, extension: &str) -> PathBuf {
    base.join(dir).join(format!("{}.{}", user_key(user_id), extension))
}

fn io_error(operation: &str, path: &Path, err: std::io::Error) -> DomainError {
    DomainError::store_unavailable(format!("Failed to {} {}: {}", operation, path.display(), err))
}

fn yaml_error(err: serde_yaml::Error) -> DomainError {
    DomainError::new(ErrorCode::SerializationFailed, err.to_string())
}

/// Read a file, mapping "not found" to `None`.
async fn read_optional(path: &Path) -> Result<Option<String>, DomainError> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_error("read", path, e)),
    }
}

/// Write through a temporary file and rename into place.
async fn write_atomic(path: &Path, content: &str) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error("create directory", parent, e))?;
    }
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)
        .await
        .map_err(|e| io_error("write", &temp_path, e))?;
    fs::rename(&temp_path, path)
        .await
        .map_err(|e| io_error("rename", path, e))
}
