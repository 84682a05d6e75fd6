//! InsightStore port for per-user insight logs.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::insights::InsightLog;

/// Storage for each user's insight log.
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Load the log; an unknown user gets an empty log.
    async fn load_log(&self, user_id: &UserId) -> Result<InsightLog, DomainError>;

    /// Replace the stored log.
    async fn save_log(&self, user_id: &UserId, log: &InsightLog) -> Result<(), DomainError>;
}
