//! Usage events: one append-only record per tool interaction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{EventId, TimeOfDay, Timestamp, ValidationError};

/// Tool identifiers the pattern families key on.
pub mod tools {
    pub const FOCUS_TIMER: &str = "focus_timer";
    pub const ESCAPE_HATCH: &str = "escape_hatch";
    pub const OVERWHELM_ALERT: &str = "overwhelm_alert";
}

/// Self-reported energy at record time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

/// Context captured by the caller when the event was recorded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContextSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<EnergyLevel>,
    /// Minutes the user had been in the current app session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_minutes: Option<u32>,
}

/// One tool-usage record. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub id: EventId,
    pub tool_id: String,
    /// Free-form context object supplied by the caller.
    #[serde(default)]
    pub context: Value,
    pub recorded_at: Timestamp,
    pub time_of_day: TimeOfDay,
    #[serde(default)]
    pub snapshot: ContextSnapshot,
}

impl UsageEvent {
    /// Creates an event, deriving the time-of-day bucket from `recorded_at`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty tool id or a context that is
    /// neither an object nor null.
    pub fn new(
        tool_id: impl Into<String>,
        context: Value,
        recorded_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let tool_id = tool_id.into();
        if tool_id.trim().is_empty() {
            return Err(ValidationError::empty_field("tool_id"));
        }
        if !(context.is_object() || context.is_null()) {
            return Err(ValidationError::invalid_format("context", "must be a JSON object"));
        }
        Ok(Self {
            id: EventId::new(),
            tool_id,
            context,
            recorded_at,
            time_of_day: TimeOfDay::of(&recorded_at),
            snapshot: ContextSnapshot::default(),
        })
    }

    pub fn with_snapshot(mut self, snapshot: ContextSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn activity(&self) -> Option<&str> {
        self.context.get("activity").and_then(Value::as_str)
    }

    pub fn completed(&self) -> Option<bool> {
        self.context.get("completed").and_then(Value::as_bool)
    }

    pub fn duration_minutes(&self) -> Option<f64> {
        self.context
            .get("duration_minutes")
            .and_then(Value::as_f64)
            .filter(|d| d.is_finite() && *d >= 0.0)
    }

    pub fn breaks(&self) -> Option<u64> {
        self.context.get("breaks").and_then(Value::as_u64)
    }

    pub fn effective(&self) -> Option<bool> {
        self.context.get("effective").and_then(Value::as_bool)
    }

    /// Rating on a 1-5 scale; out-of-range values are ignored.
    pub fn rating(&self) -> Option<u8> {
        self.context
            .get("rating")
            .and_then(Value::as_u64)
            .filter(|r| (1..=5).contains(r))
            .map(|r| r as u8)
    }

    pub fn kind(&self) -> Option<&str> {
        self.context.get("kind").and_then(Value::as_str)
    }

    pub fn is_focus_session(&self) -> bool {
        self.tool_id == tools::FOCUS_TIMER
    }

    pub fn is_escape_or_overwhelm(&self) -> bool {
        self.tool_id == tools::ESCAPE_HATCH
            || self.tool_id == tools::OVERWHELM_ALERT
            || matches!(self.kind(), Some("escape") | Some("overwhelm"))
    }

    /// Whether the tool helped: `effective` if present, else `rating >= 4`.
    pub fn succeeded(&self) -> Option<bool> {
        self.effective().or_else(|| self.rating().map(|r| r >= 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at_hour(hour: i64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_006_400 + hour * 3600)
    }

    #[test]
    fn time_of_day_is_derived_from_timestamp() {
        // 1_700_006_400 is 00:00 UTC.
        let event = UsageEvent::new("focus_timer", json!({}), at_hour(9)).unwrap();
        assert_eq!(event.time_of_day, TimeOfDay::Morning);
    }

    #[test]
    fn empty_tool_id_is_rejected() {
        assert!(UsageEvent::new("  ", json!({}), at_hour(1)).is_err());
    }

    #[test]
    fn non_object_context_is_rejected() {
        assert!(UsageEvent::new("focus_timer", json!([1, 2]), at_hour(1)).is_err());
        assert!(UsageEvent::new("focus_timer", Value::Null, at_hour(1)).is_ok());
    }

    #[test]
    fn context_accessors_read_typed_fields() {
        let event = UsageEvent::new(
            "focus_timer",
            json!({"activity": "homework", "completed": true, "duration_minutes": 42.5, "breaks": 0, "rating": 9}),
            at_hour(14),
        )
        .unwrap();
        assert_eq!(event.activity(), Some("homework"));
        assert_eq!(event.completed(), Some(true));
        assert_eq!(event.duration_minutes(), Some(42.5));
        assert_eq!(event.breaks(), Some(0));
        assert_eq!(event.rating(), None);
        assert!(event.is_focus_session());
    }

    #[test]
    fn success_prefers_effective_flag_over_rating() {
        let effective = UsageEvent::new("t", json!({"effective": false, "rating": 5}), at_hour(1)).unwrap();
        let rated = UsageEvent::new("t", json!({"rating": 4}), at_hour(1)).unwrap();
        let unknown = UsageEvent::new("t", json!({}), at_hour(1)).unwrap();
        assert_eq!(effective.succeeded(), Some(false));
        assert_eq!(rated.succeeded(), Some(true));
        assert_eq!(unknown.succeeded(), None);
    }

    #[test]
    fn escape_events_by_tool_or_kind() {
        let hatch = UsageEvent::new(tools::ESCAPE_HATCH, json!({}), at_hour(1)).unwrap();
        let tagged = UsageEvent::new("breathing", json!({"kind": "overwhelm"}), at_hour(1)).unwrap();
        let other = UsageEvent::new("breathing", json!({}), at_hour(1)).unwrap();
        assert!(hatch.is_escape_or_overwhelm());
        assert!(tagged.is_escape_or_overwhelm());
        assert!(!other.is_escape_or_overwhelm());
    }
}
