//! PostgreSQL implementation of InsightStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::insights::InsightLog;
use crate::ports::InsightStore;

/// Keeps each user's pruned insight log as one JSONB document.
#[derive(Clone)]
pub struct PostgresInsightStore {
    pool: PgPool,
}

impl PostgresInsightStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightStore for PostgresInsightStore {
    async fn load_log(&self, user_id: &UserId) -> Result<InsightLog, DomainError> {
        let row = sqlx::query("SELECT log FROM insight_logs WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("load insight log", e))?;

        match row {
            Some(row) => {
                let log: serde_json::Value =
                    row.try_get("log").map_err(|e| db_error("decode insight log", e))?;
                Ok(serde_json::from_value(log)?)
            }
            None => Ok(InsightLog::new()),
        }
    }

    async fn save_log(&self, user_id: &UserId, log: &InsightLog) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO insight_logs (user_id, log, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET log = EXCLUDED.log, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(serde_json::to_value(log)?)
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("save insight log", e))?;
        Ok(())
    }
}
