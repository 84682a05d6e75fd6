//! Hyperfocus-intensity drift: sessions running far past the warning time.

use super::{Candidate, FamilyOutcome};
use crate::domain::insights::confidence::Evidence;
use crate::domain::insights::cycle::GateOutcome;
use crate::domain::insights::insight::{InsightPayload, InsightType};
use crate::domain::profile::Profile;
use crate::domain::signals::stats::{coefficient_of_variation, mean};
use crate::domain::usage::EventWindow;

pub const WINDOW_DAYS: u32 = 7;

/// More than three long sessions are needed.
pub const MIN_LONG_SESSIONS: u32 = 4;

/// Mean long-session length must exceed the warning by this factor.
const DRIFT_FACTOR: f64 = 1.5;

pub fn analyze(profile: &Profile, window: &EventWindow) -> FamilyOutcome {
    let warning = profile.focus_timing().hyperfocus_warning_minutes();
    let sessions: Vec<_> = window
        .trailing(WINDOW_DAYS)
        .into_iter()
        .filter(|e| e.is_focus_session())
        .collect();
    let long: Vec<f64> = sessions
        .iter()
        .filter_map(|e| e.duration_minutes())
        .filter(|d| *d > f64::from(warning))
        .collect();

    if (long.len() as u32) < MIN_LONG_SESSIONS {
        return FamilyOutcome::Gated(GateOutcome::insufficient(
            InsightType::HyperfocusIntensity,
            long.len(),
            MIN_LONG_SESSIONS,
        ));
    }

    let mean_minutes = mean(&long).unwrap_or(0.0);
    if mean_minutes <= DRIFT_FACTOR * f64::from(warning) {
        return FamilyOutcome::Gated(GateOutcome::no_signal(InsightType::HyperfocusIntensity));
    }

    FamilyOutcome::Candidates(vec![Candidate {
        payload: InsightPayload::HyperfocusIntensity {
            long_sessions: long.len() as u32,
            mean_minutes,
            warning_minutes: warning,
        },
        evidence: Evidence {
            sample_count: long.len() as u32,
            dispersion: coefficient_of_variation(&long),
            usage_count: sessions.len() as u32,
        },
    }])
}
