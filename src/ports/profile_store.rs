//! ProfileStore port for profile persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::{Profile, ProfileVersion};

/// Durable storage for learner profiles.
///
/// Writes are optimistic: `expected` is the version the caller last read
/// (`None` when the profile has never been stored). A store whose current
/// version differs must reject the write with `ProfileVersionConflict`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the stored profile, or `None` if the user has none yet.
    async fn load_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Save a profile whose previous stored version was `expected`.
    ///
    /// # Errors
    ///
    /// - `ProfileVersionConflict` when the stored version is not `expected`
    /// - `StoreUnavailable` on I/O failure
    async fn save_profile(
        &self,
        profile: &Profile,
        expected: Option<ProfileVersion>,
    ) -> Result<(), DomainError>;
}
