//! JSON-lines EventLog adapter.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::warn;

use super::{io_error, read_optional, user_file};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::usage::UsageEvent;
use crate::ports::EventLog;

/// Appends one JSON document per line.
///
/// A line that fails to parse is skipped with a warning so a torn write
/// never hides the rest of the history.
#[derive(Debug, Clone)]
pub struct FileEventLog {
    base_path: PathBuf,
}

impl FileEventLog {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn log_path(&self, user_id: &UserId) -> PathBuf {
        user_file(&self.base_path, "events", user_id, "jsonl")
    }
}

#[async_trait]
impl EventLog for FileEventLog {
    async fn append_event(&self, user_id: &UserId, event: &UsageEvent) -> Result<(), DomainError> {
        let path = self.log_path(user_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("create directory", parent, e))?;
        }

        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| io_error("open", &path, e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| io_error("append to", &path, e))?;
        file.flush().await.map_err(|e| io_error("flush", &path, e))
    }

    async fn query_events(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<Vec<UsageEvent>, DomainError> {
        let Some(content) = read_optional(&self.log_path(user_id)).await? else {
            return Ok(Vec::new());
        };

        let mut events = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<UsageEvent>(line) {
                Ok(event) if !event.recorded_at.is_before(&since) => events.push(event),
                Ok(_) => {}
                Err(e) => {
                    warn!(user_id = %user_id, line = line_no + 1, error = %e, "Skipping unreadable usage event");
                }
            }
        }
        events.sort_by_key(|e| e.recorded_at);
        Ok(events)
    }
}
