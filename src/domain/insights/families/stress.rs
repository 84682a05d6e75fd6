//! Stress-trigger detection from escape and overwhelm events.

use std::collections::BTreeMap;

use super::{leading_bucket, Candidate, FamilyOutcome};
use crate::domain::insights::confidence::Evidence;
use crate::domain::insights::cycle::GateOutcome;
use crate::domain::insights::insight::{InsightPayload, InsightType};
use crate::domain::profile::Profile;
use crate::domain::usage::EventWindow;

pub const WINDOW_DAYS: u32 = 14;

pub const MIN_EVENTS: u32 = 3;

pub fn analyze(_profile: &Profile, window: &EventWindow) -> FamilyOutcome {
    let events: Vec<_> = window
        .trailing(WINDOW_DAYS)
        .into_iter()
        .filter(|e| e.is_escape_or_overwhelm())
        .collect();
    let total = events.len() as u32;
    if total < MIN_EVENTS {
        return FamilyOutcome::Gated(GateOutcome::insufficient(
            InsightType::StressPatterns,
            events.len(),
            MIN_EVENTS,
        ));
    }

    let mut by_time = BTreeMap::new();
    let mut by_activity: BTreeMap<&str, u32> = BTreeMap::new();
    for event in &events {
        *by_time.entry(event.time_of_day).or_insert(0u32) += 1;
        if let Some(activity) = event.activity() {
            *by_activity.entry(activity).or_insert(0) += 1;
        }
    }

    let Some((peak_time, peak_count)) = leading_bucket(&by_time) else {
        return FamilyOutcome::Gated(GateOutcome::no_signal(InsightType::StressPatterns));
    };
    // Most frequent activity; ties go to the alphabetically first.
    let trigger_activity = by_activity
        .iter()
        .fold(None, |best: Option<(&str, u32)>, (a, c)| match best {
            Some((_, bc)) if bc >= *c => best,
            _ => Some((*a, *c)),
        })
        .map(|(a, _)| a.to_string());

    FamilyOutcome::Candidates(vec![Candidate {
        payload: InsightPayload::StressPatterns {
            events: total,
            peak_time,
            trigger_activity,
        },
        evidence: Evidence {
            sample_count: total,
            dispersion: Some(1.0 - f64::from(peak_count) / f64::from(total)),
            usage_count: total,
        },
    }])
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::foundation::TimeOfDay;
    use crate::domain::usage::tools;
    use serde_json::json;

    #[test]
    fn two_escapes_are_not_a_pattern() {
        let window = window(vec![
            event(tools::ESCAPE_HATCH, json!({}), 1, 19),
            event(tools::ESCAPE_HATCH, json!({}), 2, 19),
        ]);
        assert_eq!(
            analyze(&profile(), &window),
            FamilyOutcome::Gated(GateOutcome::insufficient(InsightType::StressPatterns, 2, 3))
        );
    }

    #[test]
    fn peak_time_and_trigger_are_reported() {
        let window = window(vec![
            event(tools::ESCAPE_HATCH, json!({"activity": "math"}), 1, 19),
            event(tools::OVERWHELM_ALERT, json!({"activity": "math"}), 2, 18),
            event("breathing", json!({"kind": "escape", "activity": "reading"}), 3, 9),
            event("breathing", json!({"activity": "math"}), 4, 9),
        ]);
        let FamilyOutcome::Candidates(candidates) = analyze(&profile(), &window) else {
            panic!("expected a candidate");
        };
        assert_eq!(
            candidates[0].payload,
            InsightPayload::StressPatterns {
                events: 3,
                peak_time: TimeOfDay::Evening,
                trigger_activity: Some("math".to_string()),
            }
        );
    }
}
