//! PersonalizationEngine - composition root and per-user session cache.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{EnginePorts, PersonalizationSession, SessionSettings};
use crate::adapters::{
    postgres, FileEventLog, FileInsightStore, FileProfileStore, InMemoryEventLog,
    InMemoryInsightStore, InMemoryProfileStore, SystemClock,
};
use crate::config::{EngineConfig, StorageBackend, StorageConfig};
use crate::domain::foundation::{DomainError, UserId};

impl EnginePorts {
    /// Fresh in-memory stores on the system clock.
    pub fn in_memory() -> Self {
        Self {
            profile_store: Arc::new(InMemoryProfileStore::new()),
            event_log: Arc::new(InMemoryEventLog::new()),
            insight_store: Arc::new(InMemoryInsightStore::new()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Build the stores the storage section selects.
    pub async fn from_config(storage: &StorageConfig) -> Result<Self, DomainError> {
        match storage.backend {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::File => {
                let dir = storage
                    .data_dir
                    .as_ref()
                    .ok_or_else(|| DomainError::validation("storage.data_dir", "required for file storage"))?;
                Ok(Self {
                    profile_store: Arc::new(FileProfileStore::new(dir)),
                    event_log: Arc::new(FileEventLog::new(dir)),
                    insight_store: Arc::new(FileInsightStore::new(dir)),
                    clock: Arc::new(SystemClock),
                })
            }
            StorageBackend::Postgres => {
                let url = storage.database_url.as_deref().ok_or_else(|| {
                    DomainError::validation("storage.database_url", "required for postgres storage")
                })?;
                let pool = postgres::connect(url, storage.max_connections).await?;
                Ok(Self {
                    profile_store: Arc::new(postgres::PostgresProfileStore::new(pool.clone())),
                    event_log: Arc::new(postgres::PostgresEventLog::new(pool.clone())),
                    insight_store: Arc::new(postgres::PostgresInsightStore::new(pool)),
                    clock: Arc::new(SystemClock),
                })
            }
        }
    }
}

/// Hands out one `PersonalizationSession` per user.
///
/// Every caller asking for the same user gets the same session, so that
/// user's profile has exactly one writer in this process.
pub struct PersonalizationEngine {
    ports: EnginePorts,
    settings: SessionSettings,
    sessions: Mutex<HashMap<UserId, Arc<PersonalizationSession>>>,
}

impl PersonalizationEngine {
    pub fn new(ports: EnginePorts, settings: SessionSettings) -> Self {
        Self {
            ports,
            settings,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub async fn from_config(config: &EngineConfig) -> Result<Self, DomainError> {
        let ports = EnginePorts::from_config(&config.storage).await?;
        info!(backend = ?config.storage.backend, "Personalization engine ready");
        Ok(Self::new(ports, config.session_settings()))
    }

    pub fn ports(&self) -> &EnginePorts {
        &self.ports
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The user's session, opened on first use.
    pub async fn session(&self, user_id: &UserId) -> Arc<PersonalizationSession> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(user_id) {
            return session.clone();
        }
        debug!(user_id = %user_id, "Opening personalization session");
        let session = Arc::new(PersonalizationSession::new(
            user_id.clone(),
            &self.ports,
            &self.settings,
        ));
        sessions.insert(user_id.clone(), session.clone());
        session
    }

    /// Snapshot of the open sessions, ordered by user.
    pub async fn open_sessions(&self) -> Vec<Arc<PersonalizationSession>> {
        let sessions = self.sessions.lock().await;
        let mut open: Vec<_> = sessions.values().cloned().collect();
        open.sort_by(|a, b| a.user_id().cmp(b.user_id()));
        open
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Flush and drop the user's session.
    ///
    /// A session whose pending profile write still fails stays open so the
    /// merge is not lost.
    pub async fn close_session(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.lock().await;
        let Some(session) = sessions.get(user_id) else {
            return Ok(false);
        };
        session.flush_profile().await?;
        sessions.remove(user_id);
        debug!(user_id = %user_id, "Closed personalization session");
        Ok(true)
    }

    /// Retry every pending profile write. Returns how many were written.
    pub async fn flush_all(&self) -> usize {
        let mut written = 0;
        for session in self.open_sessions().await {
            match session.flush_profile().await {
                Ok(true) => written += 1,
                Ok(false) => {}
                Err(e) => warn!(user_id = %session.user_id(), error = %e, "Profile flush failed"),
            }
        }
        written
    }
}
