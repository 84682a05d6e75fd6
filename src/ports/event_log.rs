//! EventLog port for the append-only usage event log.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::usage::UsageEvent;

/// Append-only log of tool-usage events.
///
/// Implementations must accept concurrent appends. Queries return an owned
/// snapshot; callers re-query for a fresh window.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Append one event for a user.
    async fn append_event(&self, user_id: &UserId, event: &UsageEvent) -> Result<(), DomainError>;

    /// Events recorded at or after `since`, ordered by timestamp ascending.
    async fn query_events(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<Vec<UsageEvent>, DomainError>;
}
