//! Optimal-time detection: when do focus sessions succeed most?

use std::collections::BTreeMap;

use super::{leading_bucket, Candidate, FamilyOutcome};
use crate::domain::insights::confidence::Evidence;
use crate::domain::insights::cycle::GateOutcome;
use crate::domain::insights::insight::{InsightPayload, InsightType};
use crate::domain::profile::Profile;
use crate::domain::usage::EventWindow;

pub const WINDOW_DAYS: u32 = 14;

pub fn analyze(profile: &Profile, window: &EventWindow) -> FamilyOutcome {
    let mut counts = BTreeMap::new();
    for event in window.trailing(WINDOW_DAYS) {
        if event.is_focus_session() && event.completed() == Some(true) {
            *counts.entry(event.time_of_day).or_insert(0u32) += 1;
        }
    }
    let total: u32 = counts.values().sum();

    let Some((best_time, leading)) = leading_bucket(&counts) else {
        return FamilyOutcome::Gated(GateOutcome::insufficient(InsightType::FocusTiming, 0, 1));
    };
    if profile.focus_timing().preferred_time_of_day() == Some(best_time) {
        return FamilyOutcome::Gated(GateOutcome::no_signal(InsightType::FocusTiming));
    }

    let share = f64::from(leading) / f64::from(total);
    FamilyOutcome::Candidates(vec![Candidate {
        payload: InsightPayload::FocusTiming {
            best_time,
            successful_sessions: leading,
            share,
        },
        evidence: Evidence {
            sample_count: total,
            dispersion: Some(1.0 - share),
            usage_count: leading,
        },
    }])
}
