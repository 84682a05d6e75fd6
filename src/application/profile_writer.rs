//! ProfileWriter - the single writer for one learner's profile.
//!
//! Both the trait aggregator and the feedback loop mutate the profile with a
//! read-merge-write sequence. Routing every mutation through one writer per
//! user serialises them behind a mutex; the store's version check catches
//! writers in other processes.
//!
//! ## Failure handling
//!
//! | Save result | Cached profile | Caller sees |
//! |-------------|----------------|-------------|
//! | Ok | merged, clean | merged profile |
//! | `ProfileVersionConflict` | dropped | error; retry re-fetches |
//! | any other error | merged, dirty | error; `flush()` retries the write |
//!
//! A dirty profile is flushed before the next mutation is applied, so at
//! most one unsaved merge is ever pending.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::profile::{Profile, ProfileVersion};
use crate::ports::ProfileStore;

#[derive(Debug, Default)]
struct WriterState {
    cached: Option<Profile>,
    /// Version last confirmed by the store; `None` when never stored.
    persisted: Option<ProfileVersion>,
    dirty: bool,
}

pub struct ProfileWriter {
    user_id: UserId,
    store: Arc<dyn ProfileStore>,
    state: Mutex<WriterState>,
}

impl ProfileWriter {
    pub fn new(user_id: UserId, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            user_id,
            store,
            state: Mutex::new(WriterState::default()),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The session's view of the profile.
    ///
    /// Loads from the store on first use; a user without a stored profile
    /// gets neutral defaults, which are not persisted until the first merge.
    pub async fn current(&self, now: Timestamp) -> Result<Profile, DomainError> {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state, now).await?;
        state
            .cached
            .clone()
            .ok_or_else(|| DomainError::new(ErrorCode::InternalError, "Profile cache empty after load"))
    }

    /// True when a merged profile is waiting for a successful save.
    pub async fn is_dirty(&self) -> bool {
        self.state.lock().await.dirty
    }

    /// Apply a mutation and persist the result.
    ///
    /// # Errors
    ///
    /// - `ProfileVersionConflict` when another writer got there first; the
    ///   cache is dropped so a retry re-fetches
    /// - `StoreUnavailable` (or whatever the store reports) when the save
    ///   fails; the merged profile stays in memory as dirty
    pub async fn update<F>(&self, now: Timestamp, mutate: F) -> Result<Profile, DomainError>
    where
        F: FnOnce(&mut Profile) + Send,
    {
        let mut state = self.state.lock().await;
        self.ensure_loaded(&mut state, now).await?;
        if state.dirty {
            self.save(&mut state).await?;
        }

        let mut next = state
            .cached
            .clone()
            .ok_or_else(|| DomainError::new(ErrorCode::InternalError, "Profile cache empty after load"))?;
        mutate(&mut next);
        next.touch(now);

        state.cached = Some(next.clone());
        state.dirty = true;
        self.save(&mut state).await?;
        Ok(next)
    }

    /// Retry the write of a dirty profile. Returns false when nothing was
    /// pending.
    pub async fn flush(&self) -> Result<bool, DomainError> {
        let mut state = self.state.lock().await;
        if !state.dirty {
            return Ok(false);
        }
        self.save(&mut state).await?;
        Ok(true)
    }

    async fn ensure_loaded(&self, state: &mut WriterState, now: Timestamp) -> Result<(), DomainError> {
        if state.cached.is_some() {
            return Ok(());
        }
        match self.store.load_profile(&self.user_id).await? {
            Some(profile) => {
                debug!(user_id = %self.user_id, version = %profile.version(), "Profile loaded");
                state.persisted = Some(profile.version());
                state.cached = Some(profile);
            }
            None => {
                debug!(user_id = %self.user_id, "No stored profile, starting from neutral defaults");
                state.persisted = None;
                state.cached = Some(Profile::new(self.user_id.clone(), now));
            }
        }
        state.dirty = false;
        Ok(())
    }

    async fn save(&self, state: &mut WriterState) -> Result<(), DomainError> {
        let Some(profile) = state.cached.as_ref() else {
            return Ok(());
        };
        match self.store.save_profile(profile, state.persisted).await {
            Ok(()) => {
                info!(user_id = %self.user_id, version = %profile.version(), "Profile saved");
                state.persisted = Some(profile.version());
                state.dirty = false;
                Ok(())
            }
            Err(e) if e.code == ErrorCode::ProfileVersionConflict => {
                warn!(user_id = %self.user_id, error = %e, "Profile version conflict, dropping cached profile");
                *state = WriterState::default();
                Err(e)
            }
            Err(e) => {
                warn!(user_id = %self.user_id, error = %e, "Profile save failed, keeping merged profile in memory");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryProfileStore;
    use crate::domain::profile::{ProfilePatch, TraitKind};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Wraps the in-memory store and fails saves on demand.
    struct FlakyProfileStore {
        inner: InMemoryProfileStore,
        fail_saves: AtomicBool,
        save_attempts: AtomicUsize,
    }

    impl FlakyProfileStore {
        fn new() -> Self {
            Self {
                inner: InMemoryProfileStore::new(),
                fail_saves: AtomicBool::new(false),
                save_attempts: AtomicUsize::new(0),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.fail_saves.store(failing, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ProfileStore for FlakyProfileStore {
        async fn load_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
            self.inner.load_profile(user_id).await
        }

        async fn save_profile(
            &self,
            profile: &Profile,
            expected: Option<ProfileVersion>,
        ) -> Result<(), DomainError> {
            self.save_attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(DomainError::store_unavailable("Simulated outage"));
            }
            self.inner.save_profile(profile, expected).await
        }
    }

    fn user() -> UserId {
        UserId::new("learner-1").unwrap()
    }

    fn now() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn raise_hyperfocus(profile: &mut Profile) {
        profile.apply_patch(&ProfilePatch::new().shift_trait(TraitKind::HyperfocusIntensity, 1));
    }

    #[tokio::test]
    async fn current_without_stored_profile_is_neutral_and_unsaved() {
        let store = Arc::new(InMemoryProfileStore::new());
        let writer = ProfileWriter::new(user(), store.clone());

        let profile = writer.current(now()).await.unwrap();
        assert_eq!(profile.trait_score(TraitKind::HyperfocusIntensity).value(), 5);
        assert_eq!(store.profile_count().await, 0);
    }

    #[tokio::test]
    async fn update_persists_and_bumps_version() {
        let store = Arc::new(InMemoryProfileStore::new());
        let writer = ProfileWriter::new(user(), store.clone());

        let first = writer.update(now(), raise_hyperfocus).await.unwrap();
        let second = writer.update(now(), raise_hyperfocus).await.unwrap();

        assert!(second.version() > first.version());
        let stored = store.load_profile(&user()).await.unwrap().unwrap();
        assert_eq!(stored, second);
        assert_eq!(stored.trait_score(TraitKind::HyperfocusIntensity).value(), 7);
    }

    #[tokio::test]
    async fn failed_save_keeps_merge_in_memory_until_flush() {
        let store = Arc::new(FlakyProfileStore::new());
        let writer = ProfileWriter::new(user(), store.clone());
        store.set_failing(true);

        let err = writer.update(now(), raise_hyperfocus).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);
        assert!(writer.is_dirty().await);
        let in_memory = writer.current(now()).await.unwrap();
        assert_eq!(in_memory.trait_score(TraitKind::HyperfocusIntensity).value(), 6);

        store.set_failing(false);
        assert!(writer.flush().await.unwrap());
        assert!(!writer.is_dirty().await);
        let stored = store.load_profile(&user()).await.unwrap().unwrap();
        assert_eq!(stored.trait_score(TraitKind::HyperfocusIntensity).value(), 6);
    }

    #[tokio::test]
    async fn pending_merge_blocks_new_mutations_while_store_is_down() {
        let store = Arc::new(FlakyProfileStore::new());
        let writer = ProfileWriter::new(user(), store.clone());
        store.set_failing(true);
        let _ = writer.update(now(), raise_hyperfocus).await;

        assert!(writer.update(now(), raise_hyperfocus).await.is_err());
        let in_memory = writer.current(now()).await.unwrap();
        assert_eq!(in_memory.trait_score(TraitKind::HyperfocusIntensity).value(), 6);
    }

    #[tokio::test]
    async fn conflict_drops_cache_and_retry_merges_onto_fresh_copy() {
        let store = Arc::new(InMemoryProfileStore::new());
        let writer = ProfileWriter::new(user(), store.clone());
        writer.update(now(), raise_hyperfocus).await.unwrap();

        // Another process writes behind this writer's back.
        let other = ProfileWriter::new(user(), store.clone());
        other
            .update(now(), |p| {
                p.apply_patch(&ProfilePatch::new().set_trait(TraitKind::CreativityExpression, 9))
            })
            .await
            .unwrap();

        let err = writer.update(now(), raise_hyperfocus).await.unwrap_err();
        assert!(err.is_retryable());

        let merged = writer.update(now(), raise_hyperfocus).await.unwrap();
        assert_eq!(merged.trait_score(TraitKind::HyperfocusIntensity).value(), 7);
        assert_eq!(merged.trait_score(TraitKind::CreativityExpression).value(), 9);
    }

    #[tokio::test]
    async fn concurrent_updates_are_serialised() {
        let store = Arc::new(InMemoryProfileStore::new());
        let writer = Arc::new(ProfileWriter::new(user(), store.clone()));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let writer = writer.clone();
                tokio::spawn(async move { writer.update(now(), raise_hyperfocus).await })
            })
            .collect();
        for result in futures::future::join_all(tasks).await {
            result.unwrap().unwrap();
        }

        let stored = store.load_profile(&user()).await.unwrap().unwrap();
        assert_eq!(stored.trait_score(TraitKind::HyperfocusIntensity).value(), 9);
    }
}
