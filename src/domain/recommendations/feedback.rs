//! Feedback loop: an accepted insight becomes a profile patch.

use crate::domain::insights::{GrowthMetric, Insight, InsightPayload, ToolAction};
use crate::domain::profile::{ProfilePatch, StrategyDomain, TraitKind};

/// The patch an accepted insight applies. `None` for unknown payloads.
///
/// Patches use the same merge semantics as assessment rule blocks.
pub fn feedback_patch(insight: &Insight) -> Option<ProfilePatch> {
    let patch = match insight.payload() {
        InsightPayload::FocusTiming { best_time, .. } => ProfilePatch {
            preferred_time_of_day: Some(*best_time),
            ..ProfilePatch::default()
        },
        InsightPayload::HyperfocusIntensity { .. } => ProfilePatch::new()
            .shift_trait(TraitKind::HyperfocusIntensity, 1)
            .strategy(
                StrategyDomain::Focus,
                "Stand up and stretch when the hyperfocus check-in fires",
            ),
        InsightPayload::ToolEffectiveness { tool_id, action, .. } => match action {
            ToolAction::Promote => ProfilePatch {
                pin_tools: vec![tool_id.clone()],
                ..ProfilePatch::default()
            },
            ToolAction::Reconsider => ProfilePatch {
                unpin_tools: vec![tool_id.clone()],
                ..ProfilePatch::default()
            },
        },
        InsightPayload::ContextualPreference { activity, tool_id, .. } => {
            let mut patch = ProfilePatch::default();
            patch.context_defaults.insert(activity.clone(), tool_id.clone());
            patch
        }
        InsightPayload::StressPatterns { peak_time, .. } => ProfilePatch::new()
            .shift_trait(TraitKind::EmotionalRegulation, -1)
            .strategy(
                StrategyDomain::Emotional,
                format!("Plan a short calm-down break in the {}", peak_time.label()),
            ),
        InsightPayload::FlowState { mean_minutes, .. } => ProfilePatch {
            optimal_session_minutes: Some(mean_minutes.round().clamp(0.0, f64::from(u16::MAX)) as u16),
            ..ProfilePatch::default()
        },
        InsightPayload::PersonalGrowth { metric, .. } => match metric {
            GrowthMetric::CompletionRate => {
                ProfilePatch::new().shift_trait(TraitKind::ExecutiveFunction, 1)
            }
            GrowthMetric::OverwhelmReduction => {
                ProfilePatch::new().shift_trait(TraitKind::EmotionalRegulation, 1)
            }
        },
        InsightPayload::Unknown => return None,
    };
    Some(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{TimeOfDay, Timestamp, UserId};
    use crate::domain::profile::Profile;

    fn accepted(payload: InsightPayload) -> Profile {
        let insight = Insight::new(payload, 0.9, 10, 14, Timestamp::from_unix_secs(0));
        let mut profile = Profile::new(UserId::new("u").unwrap(), Timestamp::from_unix_secs(0));
        profile.apply_patch(&feedback_patch(&insight).unwrap());
        profile
    }

    #[test]
    fn focus_timing_sets_preferred_time() {
        let profile = accepted(InsightPayload::FocusTiming {
            best_time: TimeOfDay::Evening,
            successful_sessions: 4,
            share: 0.6,
        });
        assert_eq!(profile.focus_timing().preferred_time_of_day(), Some(TimeOfDay::Evening));
    }

    #[test]
    fn promote_pins_and_reconsider_unpins() {
        let payload = |action| InsightPayload::ToolEffectiveness {
            tool_id: "breathing".into(),
            activity: "homework".into(),
            uses: 10,
            success_rate: 0.8,
            action,
        };
        let mut profile = accepted(payload(ToolAction::Promote));
        assert_eq!(profile.tools().pinned_tools(), &["breathing".to_string()]);

        let reconsider = Insight::new(payload(ToolAction::Reconsider), 0.9, 10, 30, Timestamp::from_unix_secs(0));
        profile.apply_patch(&feedback_patch(&reconsider).unwrap());
        assert!(profile.tools().pinned_tools().is_empty());
    }

    #[test]
    fn flow_sets_session_length_to_observed_average() {
        let profile = accepted(InsightPayload::FlowState {
            sessions: 3,
            mean_minutes: 41.6,
        });
        assert_eq!(profile.focus_timing().optimal_session_minutes(), 42);
    }

    #[test]
    fn stress_lowers_emotional_regulation_and_adds_strategy() {
        let profile = accepted(InsightPayload::StressPatterns {
            events: 4,
            peak_time: TimeOfDay::Evening,
            trigger_activity: None,
        });
        assert_eq!(profile.trait_score(TraitKind::EmotionalRegulation).value(), 4);
        assert_eq!(profile.strategies().list(StrategyDomain::Emotional).len(), 1);
    }

    #[test]
    fn unknown_payload_has_no_patch() {
        let insight = Insight::new(InsightPayload::Unknown, 1.0, 1, 7, Timestamp::from_unix_secs(0));
        assert!(feedback_patch(&insight).is_none());
    }
}
