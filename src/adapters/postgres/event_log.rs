//! PostgreSQL implementation of EventLog.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::usage::UsageEvent;
use crate::ports::EventLog;

#[derive(Clone)]
pub struct PostgresEventLog {
    pool: PgPool,
}

impl PostgresEventLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventLog for PostgresEventLog {
    async fn append_event(&self, user_id: &UserId, event: &UsageEvent) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO usage_events (id, user_id, tool_id, recorded_at, event)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(user_id.as_str())
        .bind(&event.tool_id)
        .bind(event.recorded_at.as_datetime())
        .bind(serde_json::to_value(event)?)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("append usage event", e))?;
        Ok(())
    }

    async fn query_events(
        &self,
        user_id: &UserId,
        since: Timestamp,
    ) -> Result<Vec<UsageEvent>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT event
            FROM usage_events
            WHERE user_id = $1 AND recorded_at >= $2
            ORDER BY recorded_at ASC
            "#,
        )
        .bind(user_id.as_str())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("query usage events", e))?;

        rows.iter()
            .map(|row| {
                let event: serde_json::Value = row
                    .try_get("event")
                    .map_err(|e| db_error("decode usage event", e))?;
                Ok(serde_json::from_value(event)?)
            })
            .collect()
    }
}
