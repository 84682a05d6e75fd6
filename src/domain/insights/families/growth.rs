//! Personal growth: compares the older and newer half of a 30-day window.

use super::{outcome_spread, Candidate, FamilyOutcome};
use crate::domain::insights::confidence::Evidence;
use crate::domain::insights::cycle::GateOutcome;
use crate::domain::insights::insight::{GrowthMetric, InsightPayload, InsightType};
use crate::domain::profile::Profile;
use crate::domain::usage::{EventWindow, UsageEvent};

pub const WINDOW_DAYS: u32 = 30;

pub const MIN_SESSIONS_PER_HALF: u32 = 5;

/// Completion-rate gain that counts as growth.
const MIN_COMPLETION_GAIN: f64 = 0.15;

/// Overwhelm events must fall by at least this fraction...
const MIN_OVERWHELM_DROP: f64 = 0.3;
/// ...from at least this many in the older half.
const MIN_OVERWHELM_BASELINE: u32 = 3;

pub fn analyze(_profile: &Profile, window: &EventWindow) -> FamilyOutcome {
    let (older, newer) = window.halves(WINDOW_DAYS);
    let older_sessions = focus_sessions(&older);
    let newer_sessions = focus_sessions(&newer);
    let thinnest = older_sessions.len().min(newer_sessions.len());
    if (thinnest as u32) < MIN_SESSIONS_PER_HALF {
        return FamilyOutcome::Gated(GateOutcome::insufficient(
            InsightType::PersonalGrowth,
            thinnest,
            MIN_SESSIONS_PER_HALF,
        ));
    }
    let total_sessions = (older_sessions.len() + newer_sessions.len()) as u32;

    let mut candidates = Vec::new();

    let before = completion_rate(&older_sessions);
    let after = completion_rate(&newer_sessions);
    if after - before >= MIN_COMPLETION_GAIN {
        candidates.push(Candidate {
            payload: InsightPayload::PersonalGrowth {
                metric: GrowthMetric::CompletionRate,
                before,
                after,
            },
            evidence: Evidence {
                sample_count: total_sessions,
                dispersion: Some(outcome_spread(after)),
                usage_count: newer_sessions.len() as u32,
            },
        });
    }

    let overwhelm_before = overwhelm_count(&older);
    let overwhelm_after = overwhelm_count(&newer);
    if overwhelm_before >= MIN_OVERWHELM_BASELINE {
        let ratio = f64::from(overwhelm_after) / f64::from(overwhelm_before);
        if 1.0 - ratio >= MIN_OVERWHELM_DROP {
            candidates.push(Candidate {
                payload: InsightPayload::PersonalGrowth {
                    metric: GrowthMetric::OverwhelmReduction,
                    before: f64::from(overwhelm_before),
                    after: f64::from(overwhelm_after),
                },
                evidence: Evidence {
                    sample_count: total_sessions,
                    dispersion: Some(ratio),
                    usage_count: overwhelm_before + overwhelm_after,
                },
            });
        }
    }

    if candidates.is_empty() {
        FamilyOutcome::Gated(GateOutcome::no_signal(InsightType::PersonalGrowth))
    } else {
        FamilyOutcome::Candidates(candidates)
    }
}

fn focus_sessions<'a>(events: &[&'a UsageEvent]) -> Vec<&'a UsageEvent> {
    events.iter().copied().filter(|e| e.is_focus_session()).collect()
}

fn completion_rate(sessions: &[&UsageEvent]) -> f64 {
    if sessions.is_empty() {
        return 0.0;
    }
    let completed = sessions.iter().filter(|e| e.completed() == Some(true)).count();
    completed as f64 / sessions.len() as f64
}

fn overwhelm_count(events: &[&UsageEvent]) -> u32 {
    events.iter().filter(|e| e.is_escape_or_overwhelm()).count() as u32
}
