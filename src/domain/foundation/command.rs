//! Command infrastructure for the application handlers.
//!
//! `CommandMetadata` carries the acting user, the evaluation instant and
//! tracing context through every command and query. Handlers never read the
//! wall clock themselves; they use `issued_at`, which keeps scoring,
//! windowing and cool-downs reproducible.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Timestamp, UserId};

/// Metadata context for command and query handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user the command acts on.
    pub user_id: UserId,

    /// The instant the command is evaluated at.
    pub issued_at: Timestamp,

    /// Links related operations across one caller request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "ui", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Metadata issued now.
    pub fn new(user_id: UserId) -> Self {
        Self::at(user_id, Timestamp::now())
    }

    /// Metadata issued at an explicit instant.
    pub fn at(user_id: UserId, issued_at: Timestamp) -> Self {
        Self {
            user_id,
            issued_at,
            correlation_id: None,
            source: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_uses_the_given_instant() {
        let user_id = UserId::new("user-123").unwrap();
        let at = Timestamp::from_unix_secs(1_700_000_000);
        let metadata = CommandMetadata::at(user_id.clone(), at);

        assert_eq!(metadata.user_id, user_id);
        assert_eq!(metadata.issued_at, at);
        assert!(metadata.source().is_none());
    }

    #[test]
    fn correlation_id_returns_set_value() {
        let metadata = CommandMetadata::new(UserId::new("user").unwrap())
            .with_correlation_id("my-correlation-id")
            .with_source("scheduler");

        assert_eq!(metadata.correlation_id(), "my-correlation-id");
        assert_eq!(metadata.source(), Some("scheduler"));
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(UserId::new("user").unwrap());
        assert!(!metadata.correlation_id().is_empty());
    }
}
