//! In-memory ProfileStore adapter.
//!
//! Keeps profiles in a map keyed by user. Useful for tests and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::{Profile, ProfileVersion};
use crate::ports::ProfileStore;

/// In-memory storage for profiles
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored profiles
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save_profile(
        &self,
        profile: &Profile,
        expected: Option<ProfileVersion>,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        let actual = profiles.get(profile.user_id()).map(|p| p.version());
        if actual != expected {
            return Err(DomainError::version_conflict(
                expected.map(|v| v.as_u32()),
                actual.map(|v| v.as_u32()),
            ));
        }
        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, Timestamp};

    fn test_profile() -> Profile {
        Profile::new(UserId::new("learner-1").unwrap(), Timestamp::from_unix_secs(1_700_000_000))
    }

    #[tokio::test]
    async fn load_unknown_user_returns_none() {
        let store = InMemoryProfileStore::new();
        let loaded = store.load_profile(&UserId::new("nobody").unwrap()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn first_save_then_versioned_update() {
        let store = InMemoryProfileStore::new();
        let mut profile = test_profile();
        store.save_profile(&profile, None).await.unwrap();

        let stored_version = profile.version();
        profile.touch(Timestamp::from_unix_secs(1_700_000_100));
        store.save_profile(&profile, Some(stored_version)).await.unwrap();

        let loaded = store.load_profile(profile.user_id()).await.unwrap().unwrap();
        assert_eq!(loaded.version().as_u32(), 2);
        assert_eq!(store.profile_count().await, 1);
    }

    #[tokio::test]
    async fn stale_expected_version_is_rejected() {
        let store = InMemoryProfileStore::new();
        let profile = test_profile();
        store.save_profile(&profile, None).await.unwrap();

        let err = store.save_profile(&profile, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileVersionConflict);
        assert!(err.is_retryable());
    }
}
