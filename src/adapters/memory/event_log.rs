//! In-memory EventLog adapter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::usage::UsageEvent;
use crate::ports::EventLog;

/// Append-only in-memory event log.
///
/// Appends take the write lock only for the push; queries clone the
/// matching slice so readers never hold the lock across analysis.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<HashMap<UserId, Vec<UsageEvent>>>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total events stored for a user
    pub async fn event_count(&self, user_id: &UserId) -> usize {
        self.events.read().await.get(user_id).map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append_event(&self, user_id: &UserId, event: &UsageEvent) -> Result<(), DomainError> {
        self.events
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .push(event.clone());
        Ok(())
    }

    async fn query_events(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<Vec<UsageEvent>, DomainError> {
        let mut events: Vec<UsageEvent> = self
            .events
            .read()
            .await
            .get(user_id)
            .map(|all| {
                all.iter()
                    .filter(|e| !e.recorded_at.is_before(&since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        events.sort_by_key(|e| e.recorded_at);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_at(secs: i64) -> UsageEvent {
        UsageEvent::new("focus_timer", json!({}), Timestamp::from_unix_secs(secs)).unwrap()
    }

    #[tokio::test]
    async fn query_filters_by_since_and_sorts_ascending() {
        let log = InMemoryEventLog::new();
        let user = UserId::new("learner-1").unwrap();
        for secs in [300, 100, 200] {
            log.append_event(&user, &event_at(secs)).await.unwrap();
        }

        let events = log.query_events(&user, Timestamp::from_unix_secs(150)).await.unwrap();
        let times: Vec<i64> = events.iter().map(|e| e.recorded_at.as_unix_secs()).collect();
        assert_eq!(times, vec![200, 300]);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let log = InMemoryEventLog::new();
        let alice = UserId::new("alice").unwrap();
        let bob = UserId::new("bob").unwrap();
        log.append_event(&alice, &event_at(100)).await.unwrap();

        assert_eq!(log.event_count(&alice).await, 1);
        assert!(log.query_events(&bob, Timestamp::from_unix_secs(0)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_appends_are_all_kept() {
        let log = InMemoryEventLog::new();
        let user = UserId::new("learner-1").unwrap();
        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let log = log.clone();
                let user = user.clone();
                tokio::spawn(async move { log.append_event(&user, &event_at(i)).await })
            })
            .collect();
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }
        assert_eq!(log.event_count(&user).await, 20);
    }
}
