//! Contextual preference: which tool dominates a given activity.

use std::collections::BTreeMap;

use super::{Candidate, FamilyOutcome};
use crate::domain::insights::confidence::Evidence;
use crate::domain::insights::cycle::GateOutcome;
use crate::domain::insights::insight::{InsightPayload, InsightType};
use crate::domain::profile::Profile;
use crate::domain::usage::EventWindow;

pub const WINDOW_DAYS: u32 = 21;

pub const MIN_GROUP_EVENTS: u32 = 5;

/// A tool must account for more than this share of its activity group.
pub const MIN_SHARE: f64 = 0.4;

pub fn analyze(profile: &Profile, window: &EventWindow) -> FamilyOutcome {
    let events = window.trailing(WINDOW_DAYS);
    let mut groups: BTreeMap<&str, BTreeMap<&str, u32>> = BTreeMap::new();
    for event in events.iter().copied() {
        if let Some(activity) = event.activity() {
            *groups
                .entry(activity)
                .or_default()
                .entry(event.tool_id.as_str())
                .or_insert(0) += 1;
        }
    }

    let largest = groups.values().map(|g| g.values().sum::<u32>()).max().unwrap_or(0);
    if largest < MIN_GROUP_EVENTS {
        return FamilyOutcome::Gated(GateOutcome::insufficient(
            InsightType::ContextualPreference,
            largest as usize,
            MIN_GROUP_EVENTS,
        ));
    }

    let mut candidates = Vec::new();
    for (activity, tools) in &groups {
        let group_size: u32 = tools.values().sum();
        if group_size < MIN_GROUP_EVENTS {
            continue;
        }
        let Some((tool_id, count)) = leader(tools) else {
            continue;
        };
        let share = f64::from(count) / f64::from(group_size);
        if share <= MIN_SHARE || profile.tools().default_for(activity) == Some(tool_id) {
            continue;
        }
        candidates.push(Candidate {
            payload: InsightPayload::ContextualPreference {
                activity: activity.to_string(),
                tool_id: tool_id.to_string(),
                share,
                group_size,
            },
            evidence: Evidence {
                sample_count: group_size,
                dispersion: Some(1.0 - share),
                usage_count: count,
            },
        });
    }

    if candidates.is_empty() {
        FamilyOutcome::Gated(GateOutcome::no_signal(InsightType::ContextualPreference))
    } else {
        FamilyOutcome::Candidates(candidates)
    }
}

/// The single most used tool in a group. `None` when the top count is tied.
fn leader<'a>(tools: &BTreeMap<&'a str, u32>) -> Option<(&'a str, u32)> {
    let top = tools.values().copied().max()?;
    let mut leaders = tools.iter().filter(|(_, count)| **count == top);
    let (tool_id, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some((*tool_id, top))
}
