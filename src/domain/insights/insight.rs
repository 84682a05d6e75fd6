//! Insights: confidence-scored findings mined from the usage log.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::domain::foundation::{InsightId, TimeOfDay, Timestamp};

/// Kind of finding. `Unknown` covers types written by newer rulesets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    FocusTiming,
    HyperfocusIntensity,
    ToolEffectiveness,
    ContextualPreference,
    StressPatterns,
    FlowState,
    PersonalGrowth,
    #[serde(other)]
    Unknown,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::FocusTiming => "focus_timing",
            InsightType::HyperfocusIntensity => "hyperfocus_intensity",
            InsightType::ToolEffectiveness => "tool_effectiveness",
            InsightType::ContextualPreference => "contextual_preference",
            InsightType::StressPatterns => "stress_patterns",
            InsightType::FlowState => "flow_state",
            InsightType::PersonalGrowth => "personal_growth",
            InsightType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a tool-effectiveness finding suggests doing with the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolAction {
    /// Make the tool more prominent.
    Promote,
    /// Suggest trying something else.
    Reconsider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthMetric {
    CompletionRate,
    OverwhelmReduction,
}

/// Type-specific finding data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InsightPayload {
    FocusTiming {
        best_time: TimeOfDay,
        successful_sessions: u32,
        share: f64,
    },
    HyperfocusIntensity {
        long_sessions: u32,
        mean_minutes: f64,
        warning_minutes: u16,
    },
    ToolEffectiveness {
        tool_id: String,
        activity: String,
        uses: u32,
        success_rate: f64,
        action: ToolAction,
    },
    ContextualPreference {
        activity: String,
        tool_id: String,
        share: f64,
        group_size: u32,
    },
    StressPatterns {
        events: u32,
        peak_time: TimeOfDay,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trigger_activity: Option<String>,
    },
    FlowState {
        sessions: u32,
        mean_minutes: f64,
    },
    PersonalGrowth {
        metric: GrowthMetric,
        before: f64,
        after: f64,
    },
    /// Payload of a type this build does not recognise.
    #[serde(other)]
    Unknown,
}

impl InsightPayload {
    pub fn insight_type(&self) -> InsightType {
        match self {
            InsightPayload::FocusTiming { .. } => InsightType::FocusTiming,
            InsightPayload::HyperfocusIntensity { .. } => InsightType::HyperfocusIntensity,
            InsightPayload::ToolEffectiveness { .. } => InsightType::ToolEffectiveness,
            InsightPayload::ContextualPreference { .. } => InsightType::ContextualPreference,
            InsightPayload::StressPatterns { .. } => InsightType::StressPatterns,
            InsightPayload::FlowState { .. } => InsightType::FlowState,
            InsightPayload::PersonalGrowth { .. } => InsightType::PersonalGrowth,
            InsightPayload::Unknown => InsightType::Unknown,
        }
    }

    /// What the finding is about, independent of its conclusion.
    ///
    /// Two findings on the same topic are the same or contradictory; either
    /// way only one may be emitted per cool-down.
    pub fn topic(&self) -> String {
        match self {
            InsightPayload::FocusTiming { .. } => "best_time".to_string(),
            InsightPayload::HyperfocusIntensity { .. } => "long_sessions".to_string(),
            InsightPayload::ToolEffectiveness { tool_id, activity, .. } => {
                format!("tool:{}@{}", tool_id, activity)
            }
            InsightPayload::ContextualPreference { activity, .. } => format!("activity:{}", activity),
            InsightPayload::StressPatterns { .. } => "stress".to_string(),
            InsightPayload::FlowState { .. } => "flow".to_string(),
            InsightPayload::PersonalGrowth { metric, .. } => match metric {
                GrowthMetric::CompletionRate => "growth:completion".to_string(),
                GrowthMetric::OverwhelmReduction => "growth:overwhelm".to_string(),
            },
            InsightPayload::Unknown => "unknown".to_string(),
        }
    }

    /// The part of the finding its feedback patch acts on.
    ///
    /// Sample counts and rates drift as the window slides; the conclusion only
    /// changes when the finding would recommend something different.
    pub fn conclusion(&self) -> String {
        match self {
            InsightPayload::FocusTiming { best_time, .. } => best_time.label().to_string(),
            InsightPayload::ToolEffectiveness { action, .. } => match action {
                ToolAction::Promote => "promote".to_string(),
                ToolAction::Reconsider => "reconsider".to_string(),
            },
            InsightPayload::ContextualPreference { tool_id, .. } => tool_id.clone(),
            InsightPayload::StressPatterns { peak_time, .. } => peak_time.label().to_string(),
            // Nearest five minutes.
            InsightPayload::FlowState { mean_minutes, .. } => {
                format!("{}m", ((mean_minutes / 5.0).round() * 5.0) as i64)
            }
            InsightPayload::HyperfocusIntensity { .. }
            | InsightPayload::PersonalGrowth { .. }
            | InsightPayload::Unknown => String::new(),
        }
    }
}

/// Cool-down key for `(type, topic, window)`.
pub fn fingerprint(insight_type: InsightType, topic: &str, window_days: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(insight_type.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(topic.as_bytes());
    hasher.update(b"|");
    hasher.update(window_days.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// A recognizer finding. Only `actioned` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    id: InsightId,
    payload: InsightPayload,
    confidence: f64,
    sample_count: u32,
    window_days: u32,
    fingerprint: String,
    /// Whether presentation gating may surface this insight.
    presentable: bool,
    actioned: bool,
    created_at: Timestamp,
}

impl Insight {
    pub fn new(
        payload: InsightPayload,
        confidence: f64,
        sample_count: u32,
        window_days: u32,
        created_at: Timestamp,
    ) -> Self {
        let fingerprint = fingerprint(payload.insight_type(), &payload.topic(), window_days);
        let confidence = if confidence.is_finite() { confidence.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            id: InsightId::new(),
            payload,
            confidence,
            sample_count,
            window_days,
            fingerprint,
            presentable: false,
            actioned: false,
            created_at,
        }
    }

    pub fn with_presentable(mut self, presentable: bool) -> Self {
        self.presentable = presentable;
        self
    }

    pub fn id(&self) -> InsightId {
        self.id
    }

    pub fn insight_type(&self) -> InsightType {
        self.payload.insight_type()
    }

    pub fn payload(&self) -> &InsightPayload {
        &self.payload
    }

    pub fn topic(&self) -> String {
        self.payload.topic()
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn is_presentable(&self) -> bool {
        self.presentable
    }

    pub fn is_actioned(&self) -> bool {
        self.actioned
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Terminal: an actioned insight is never surfaced again.
    pub fn mark_actioned(&mut self) {
        self.actioned = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_payload(action: ToolAction) -> InsightPayload {
        InsightPayload::ToolEffectiveness {
            tool_id: "focus_timer".into(),
            activity: "homework".into(),
            uses: 10,
            success_rate: 0.8,
            action,
        }
    }

    #[test]
    fn contradictory_findings_share_a_fingerprint() {
        let at = Timestamp::from_unix_secs(1_700_000_000);
        let promote = Insight::new(tool_payload(ToolAction::Promote), 0.9, 10, 30, at);
        let reconsider = Insight::new(tool_payload(ToolAction::Reconsider), 0.9, 10, 30, at);
        assert_eq!(promote.fingerprint(), reconsider.fingerprint());
    }

    #[test]
    fn conclusion_ignores_drifting_counts() {
        let flow = |sessions, mean_minutes| InsightPayload::FlowState { sessions, mean_minutes };
        assert_eq!(flow(3, 41.0).conclusion(), flow(6, 39.0).conclusion());
        assert_ne!(flow(3, 40.0).conclusion(), flow(3, 55.0).conclusion());
        assert_ne!(
            tool_payload(ToolAction::Promote).conclusion(),
            tool_payload(ToolAction::Reconsider).conclusion()
        );
    }

    #[test]
    fn fingerprint_depends_on_window() {
        assert_ne!(
            fingerprint(InsightType::FlowState, "flow", 14),
            fingerprint(InsightType::FlowState, "flow", 30)
        );
    }

    #[test]
    fn confidence_is_clamped() {
        let at = Timestamp::from_unix_secs(0);
        assert_eq!(Insight::new(InsightPayload::Unknown, 1.7, 0, 7, at).confidence(), 1.0);
        assert_eq!(Insight::new(InsightPayload::Unknown, f64::NAN, 0, 7, at).confidence(), 0.0);
    }

    #[test]
    fn payload_serializes_with_type_tag() {
        let payload = InsightPayload::FlowState {
            sessions: 4,
            mean_minutes: 40.0,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "flow_state");
        assert_eq!(json["sessions"], 4);
    }

    #[test]
    fn unrecognised_payload_type_deserializes_as_unknown() {
        let payload: InsightPayload =
            serde_json::from_str(r#"{"type":"sleep_quality","hours":7}"#).unwrap();
        assert_eq!(payload, InsightPayload::Unknown);
        assert_eq!(payload.insight_type(), InsightType::Unknown);
    }

    #[test]
    fn mark_actioned_is_sticky() {
        let mut insight = Insight::new(
            InsightPayload::FlowState {
                sessions: 3,
                mean_minutes: 35.0,
            },
            0.9,
            3,
            14,
            Timestamp::from_unix_secs(0),
        );
        insight.mark_actioned();
        insight.mark_actioned();
        assert!(insight.is_actioned());
    }
}
