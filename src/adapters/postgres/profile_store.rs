//! PostgreSQL implementation of ProfileStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

use super::db_error;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::{Profile, ProfileVersion};
use crate::ports::ProfileStore;

/// Stores each profile as a JSONB document next to its version.
#[derive(Clone)]
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn stored_version(&self, user_id: &UserId) -> Result<Option<u32>, DomainError> {
        let version: Option<i32> =
            sqlx::query_scalar("SELECT version FROM learner_profiles WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("read profile version", e))?;
        Ok(version.map(|v| v as u32))
    }

    async fn insert(&self, profile: &Profile, document: serde_json::Value) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO learner_profiles (
                user_id, version, schema_version, ruleset_version, document, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(profile.version().as_u32() as i32)
        .bind(profile.schema_version() as i16)
        .bind(profile.ruleset_version().map(|v| v as i32))
        .bind(document)
        .bind(profile.created_at().as_datetime())
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert profile", e))?;
        Ok(result.rows_affected())
    }

    async fn update(
        &self,
        profile: &Profile,
        document: serde_json::Value,
        expected: ProfileVersion,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE learner_profiles
            SET version = $1, schema_version = $2, ruleset_version = $3,
                document = $4, updated_at = $5
            WHERE user_id = $6 AND version = $7
            "#,
        )
        .bind(profile.version().as_u32() as i32)
        .bind(profile.schema_version() as i16)
        .bind(profile.ruleset_version().map(|v| v as i32))
        .bind(document)
        .bind(profile.updated_at().as_datetime())
        .bind(profile.user_id().as_str())
        .bind(expected.as_u32() as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update profile", e))?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn load_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query("SELECT document FROM learner_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("load profile", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let document: serde_json::Value = row
            .try_get("document")
            .map_err(|e| db_error("decode profile", e))?;
        Ok(Some(serde_json::from_value(document)?))
    }

    async fn save_profile(
        &self,
        profile: &Profile,
        expected: Option<ProfileVersion>,
    ) -> Result<(), DomainError> {
        let document = serde_json::to_value(profile)?;
        let affected = match expected {
            None => self.insert(profile, document).await?,
            Some(version) => self.update(profile, document, version).await?,
        };

        if affected == 0 {
            let actual = self.stored_version(profile.user_id()).await?;
            return Err(DomainError::version_conflict(
                expected.map(|v| v.as_u32()),
                actual,
            ));
        }

        debug!(user_id = %profile.user_id(), version = %profile.version(), "Profile row written");
        Ok(())
    }
}
