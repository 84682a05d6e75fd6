//! YAML-on-disk ProfileStore adapter.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use super::{read_optional, user_file, write_atomic, yaml_error};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::{Profile, ProfileVersion};
use crate::ports::ProfileStore;

/// Stores one YAML document per profile.
///
/// The version check and the write happen under one lock, so a single
/// process never interleaves two saves.
#[derive(Debug)]
pub struct FileProfileStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileProfileStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    fn profile_path(&self, user_id: &UserId) -> PathBuf {
        user_file(&self.base_path, "profiles", user_id, "yaml")
    }

    async fn read_profile(&self, path: &Path) -> Result<Option<Profile>, DomainError> {
        match read_optional(path).await? {
            Some(yaml) => serde_yaml::from_str(&yaml).map(Some).map_err(yaml_error),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn load_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        self.read_profile(&self.profile_path(user_id)).await
    }

    async fn save_profile(
        &self,
        profile: &Profile,
        expected: Option<ProfileVersion>,
    ) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        let path = self.profile_path(profile.user_id());

        let actual = self.read_profile(&path).await?.map(|p| p.version());
        if actual != expected {
            return Err(DomainError::version_conflict(
                expected.map(|v| v.as_u32()),
                actual.map(|v| v.as_u32()),
            ));
        }

        let yaml = serde_yaml::to_string(profile).map_err(yaml_error)?;
        write_atomic(&path, &yaml).await?;
        debug!(user_id = %profile.user_id(), version = %profile.version(), "Profile written to disk");
        Ok(())
    }
}
