//! PostgreSQL adapters - Database implementations for the storage ports.
//!
//! - `PostgresProfileStore` - Profile documents with a version column for
//!   optimistic writes
//! - `PostgresEventLog` - One row per usage event, indexed by user and time
//! - `PostgresInsightStore` - One JSONB log document per user

mod event_log;
mod insight_store;
mod profile_store;

pub use event_log::PostgresEventLog;
pub use insight_store::PostgresInsightStore;
pub use profile_store::PostgresProfileStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Open a pool and apply the embedded migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| db_error("connect", e))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DomainError::store_unavailable(format!("Failed to run migrations: {}", e)))?;

    Ok(pool)
}

fn db_error(operation: &str, err: sqlx::Error) -> DomainError {
    DomainError::store_unavailable(format!("Database error during {}: {}", operation, err))
        .with_detail("operation", operation)
}
