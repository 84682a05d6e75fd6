//! YAML-on-disk InsightStore adapter.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{read_optional, user_file, write_atomic, yaml_error};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insights::InsightLog;
use crate::ports::InsightStore;

#[derive(Debug, Clone)]
pub struct FileInsightStore {
    base_path: PathBuf,
}

impl FileInsightStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn log_path(&self, user_id: &UserId) -> PathBuf {
        user_file(&self.base_path, "insights", user_id, "yaml")
    }
}

#[async_trait]
impl InsightStore for FileInsightStore {
    async fn load_log(&self, user_id: &UserId) -> Result<InsightLog, DomainError> {
        match read_optional(&self.log_path(user_id)).await? {
            Some(yaml) => serde_yaml::from_str(&yaml).map_err(yaml_error),
            None => Ok(InsightLog::new()),
        }
    }

    async fn save_log(&self, user_id: &UserId, log: &InsightLog) -> Result<(), DomainError> {
        let yaml = serde_yaml::to_string(log).map_err(yaml_error)?;
        write_atomic(&self.log_path(user_id), &yaml).await
    }
}
