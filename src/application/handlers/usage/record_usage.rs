//! RecordUsage - Command handler appending one tool interaction to the log.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::usage::{ContextSnapshot, UsageEvent};
use crate::ports::EventLog;

/// Command describing one tool interaction.
#[derive(Debug, Clone)]
pub struct RecordUsageCommand {
    pub tool_id: String,
    /// Free-form context object (`activity`, `completed`, `duration_minutes`, ...).
    pub context: Value,
    pub snapshot: ContextSnapshot,
}

impl RecordUsageCommand {
    pub fn new(tool_id: impl Into<String>, context: Value) -> Self {
        Self {
            tool_id: tool_id.into(),
            context,
            snapshot: ContextSnapshot::default(),
        }
    }

    pub fn with_snapshot(mut self, snapshot: ContextSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }
}

pub struct RecordUsageHandler {
    event_log: Arc<dyn EventLog>,
}

impl RecordUsageHandler {
    pub fn new(event_log: Arc<dyn EventLog>) -> Self {
        Self { event_log }
    }

    /// Validates and appends the event, stamped at `metadata.issued_at`.
    pub async fn handle(
        &self,
        cmd: RecordUsageCommand,
        metadata: &CommandMetadata,
    ) -> Result<UsageEvent, DomainError> {
        let event = UsageEvent::new(cmd.tool_id, cmd.context, metadata.issued_at)?
            .with_snapshot(cmd.snapshot);

        if let Err(e) = self.event_log.append_event(&metadata.user_id, &event).await {
            warn!(user_id = %metadata.user_id, tool_id = %event.tool_id, error = %e, "Usage event append failed");
            return Err(e);
        }

        debug!(user_id = %metadata.user_id, tool_id = %event.tool_id, time_of_day = %event.time_of_day, "Usage event recorded");
        Ok(event)
    }
}
