//! In-memory InsightStore adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insights::InsightLog;
use crate::ports::InsightStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryInsightStore {
    logs: Arc<RwLock<HashMap<UserId, InsightLog>>>,
}

impl InMemoryInsightStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InsightStore for InMemoryInsightStore {
    async fn load_log(&self, user_id: &UserId) -> Result<InsightLog, DomainError> {
        Ok(self.logs.read().await.get(user_id).cloned().unwrap_or_default())
    }

    async fn save_log(&self, user_id: &UserId, log: &InsightLog) -> Result<(), DomainError> {
        self.logs.write().await.insert(user_id.clone(), log.clone());
        Ok(())
    }
}
