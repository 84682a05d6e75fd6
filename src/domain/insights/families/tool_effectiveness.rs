//! Tool effectiveness per (tool, activity) pair.

use std::collections::BTreeMap;

use super::{outcome_spread, Candidate, FamilyOutcome};
use crate::domain::insights::confidence::Evidence;
use crate::domain::insights::cycle::GateOutcome;
use crate::domain::insights::insight::{InsightPayload, InsightType, ToolAction};
use crate::domain::profile::Profile;
use crate::domain::usage::EventWindow;

pub const WINDOW_DAYS: u32 = 30;

/// Uses a group needs before it is considered at all.
pub const MIN_GROUP_USES: u32 = 5;

/// Uses a group needs before a prominence change (pin or unpin) is suggested.
pub const PROMOTE_MIN_USES: u32 = 10;

pub const PROMOTE_SUCCESS_RATE: f64 = 0.7;
pub const RECONSIDER_SUCCESS_RATE: f64 = 0.3;

/// Activity label for events that carry none.
const GENERAL_ACTIVITY: &str = "general";

#[derive(Default)]
struct GroupStats {
    uses: u32,
    rated: u32,
    successes: u32,
}

pub fn analyze(_profile: &Profile, window: &EventWindow) -> FamilyOutcome {
    let mut groups: BTreeMap<(String, String), GroupStats> = BTreeMap::new();
    for event in window.trailing(WINDOW_DAYS) {
        let activity = event.activity().unwrap_or(GENERAL_ACTIVITY).to_string();
        let stats = groups.entry((event.tool_id.clone(), activity)).or_default();
        stats.uses += 1;
        if let Some(success) = event.succeeded() {
            stats.rated += 1;
            if success {
                stats.successes += 1;
            }
        }
    }

    let largest = groups.values().map(|g| g.uses).max().unwrap_or(0);
    if largest < MIN_GROUP_USES {
        return FamilyOutcome::Gated(GateOutcome::insufficient(
            InsightType::ToolEffectiveness,
            largest as usize,
            MIN_GROUP_USES,
        ));
    }

    let candidates: Vec<Candidate> = groups
        .into_iter()
        .filter(|(_, g)| g.uses >= MIN_GROUP_USES && g.rated > 0)
        .filter_map(|((tool_id, activity), g)| {
            let success_rate = f64::from(g.successes) / f64::from(g.rated);
            let action = classify(g.uses, success_rate)?;
            Some(Candidate {
                payload: InsightPayload::ToolEffectiveness {
                    tool_id,
                    activity,
                    uses: g.uses,
                    success_rate,
                    action,
                },
                evidence: Evidence {
                    sample_count: g.rated,
                    dispersion: Some(outcome_spread(success_rate)),
                    usage_count: g.uses,
                },
            })
        })
        .collect();

    if candidates.is_empty() {
        FamilyOutcome::Gated(GateOutcome::no_signal(InsightType::ToolEffectiveness))
    } else {
        FamilyOutcome::Candidates(candidates)
    }
}

/// Both actions change the tool's prominence, so both need `PROMOTE_MIN_USES`.
fn classify(uses: u32, success_rate: f64) -> Option<ToolAction> {
    if uses < PROMOTE_MIN_USES {
        None
    } else if success_rate >= PROMOTE_SUCCESS_RATE {
        Some(ToolAction::Promote)
    } else if success_rate <= RECONSIDER_SUCCESS_RATE {
        Some(ToolAction::Reconsider)
    } else {
        None
    }
}
