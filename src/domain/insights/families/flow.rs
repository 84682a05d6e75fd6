//! Flow-state detection: long, unbroken focus sessions.

use super::{Candidate, FamilyOutcome};
use crate::domain::insights::confidence::Evidence;
use crate::domain::insights::cycle::GateOutcome;
use crate::domain::insights::insight::{InsightPayload, InsightType};
use crate::domain::profile::Profile;
use crate::domain::signals::stats::{coefficient_of_variation, mean};
use crate::domain::usage::EventWindow;

pub const WINDOW_DAYS: u32 = 14;

pub const MIN_FLOW_SESSIONS: u32 = 3;

/// A flow session runs at least this multiple of the optimal length.
const FLOW_LENGTH_FACTOR: f64 = 1.2;

pub fn analyze(profile: &Profile, window: &EventWindow) -> FamilyOutcome {
    let optimal = f64::from(profile.focus_timing().optimal_session_minutes());
    let sessions: Vec<_> = window
        .trailing(WINDOW_DAYS)
        .into_iter()
        .filter(|e| e.is_focus_session())
        .collect();
    let flow: Vec<f64> = sessions
        .iter()
        .filter(|e| e.breaks().unwrap_or(0) == 0)
        .filter_map(|e| e.duration_minutes())
        .filter(|d| *d >= FLOW_LENGTH_FACTOR * optimal)
        .collect();

    if (flow.len() as u32) < MIN_FLOW_SESSIONS {
        return FamilyOutcome::Gated(GateOutcome::insufficient(
            InsightType::FlowState,
            flow.len(),
            MIN_FLOW_SESSIONS,
        ));
    }

    FamilyOutcome::Candidates(vec![Candidate {
        payload: InsightPayload::FlowState {
            sessions: flow.len() as u32,
            mean_minutes: mean(&flow).unwrap_or(optimal),
        },
        evidence: Evidence {
            sample_count: flow.len() as u32,
            dispersion: coefficient_of_variation(&flow),
            usage_count: sessions.len() as u32,
        },
    }])
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn sessions_with_breaks_are_not_flow() {
        // Default optimal is 25 minutes, so flow starts at 30.
        let window = window(vec![
            focus_session(1, 10, 40.0, true, 0),
            focus_session(2, 10, 40.0, true, 0),
            focus_session(3, 10, 40.0, true, 2),
        ]);
        assert_eq!(
            analyze(&profile(), &window),
            FamilyOutcome::Gated(GateOutcome::insufficient(InsightType::FlowState, 2, 3))
        );
    }

    #[test]
    fn three_unbroken_long_sessions_are_flow() {
        let window = window(vec![
            focus_session(1, 10, 32.0, true, 0),
            focus_session(2, 10, 40.0, true, 0),
            focus_session(3, 10, 48.0, true, 0),
            focus_session(4, 10, 20.0, true, 0),
        ]);
        let FamilyOutcome::Candidates(candidates) = analyze(&profile(), &window) else {
            panic!("expected a candidate");
        };
        assert_eq!(
            candidates[0].payload,
            InsightPayload::FlowState {
                sessions: 3,
                mean_minutes: 40.0,
            }
        );
        assert_eq!(candidates[0].evidence.usage_count, 4);
    }
}
