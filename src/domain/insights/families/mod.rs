//! Pattern families. Each is a pure function over `(Profile, EventWindow)`.

mod contextual_preference;
mod flow;
mod focus_timing;
mod growth;
mod hyperfocus;
mod stress;
mod tool_effectiveness;

use std::collections::BTreeMap;

use super::confidence::Evidence;
use super::cycle::{AnalysisKind, GateOutcome};
use super::insight::{InsightPayload, InsightType};
use crate::domain::foundation::TimeOfDay;
use crate::domain::profile::Profile;
use crate::domain::usage::EventWindow;

pub use tool_effectiveness::{PROMOTE_MIN_USES, PROMOTE_SUCCESS_RATE, RECONSIDER_SUCCESS_RATE};

/// A finding before confidence scoring and cool-down checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub payload: InsightPayload,
    pub evidence: Evidence,
}

/// What a family produced for one cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FamilyOutcome {
    Candidates(Vec<Candidate>),
    Gated(GateOutcome),
}

/// One row of the family table.
#[derive(Clone, Copy)]
pub struct PatternFamily {
    pub insight_type: InsightType,
    pub kind: AnalysisKind,
    pub window_days: u32,
    /// Smallest group the family will look at.
    pub min_samples: u32,
    pub analyze: fn(&Profile, &EventWindow) -> FamilyOutcome,
}

impl std::fmt::Debug for PatternFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternFamily")
            .field("insight_type", &self.insight_type)
            .field("window_days", &self.window_days)
            .finish()
    }
}

pub const FAMILIES: &[PatternFamily] = &[
    PatternFamily {
        insight_type: InsightType::FocusTiming,
        kind: AnalysisKind::Behavioral,
        window_days: focus_timing::WINDOW_DAYS,
        min_samples: 1,
        analyze: focus_timing::analyze,
    },
    PatternFamily {
        insight_type: InsightType::HyperfocusIntensity,
        kind: AnalysisKind::Behavioral,
        window_days: hyperfocus::WINDOW_DAYS,
        min_samples: hyperfocus::MIN_LONG_SESSIONS,
        analyze: hyperfocus::analyze,
    },
    PatternFamily {
        insight_type: InsightType::ToolEffectiveness,
        kind: AnalysisKind::Behavioral,
        window_days: tool_effectiveness::WINDOW_DAYS,
        min_samples: tool_effectiveness::MIN_GROUP_USES,
        analyze: tool_effectiveness::analyze,
    },
    PatternFamily {
        insight_type: InsightType::ContextualPreference,
        kind: AnalysisKind::Behavioral,
        window_days: contextual_preference::WINDOW_DAYS,
        min_samples: contextual_preference::MIN_GROUP_EVENTS,
        analyze: contextual_preference::analyze,
    },
    PatternFamily {
        insight_type: InsightType::StressPatterns,
        kind: AnalysisKind::Behavioral,
        window_days: stress::WINDOW_DAYS,
        min_samples: stress::MIN_EVENTS,
        analyze: stress::analyze,
    },
    PatternFamily {
        insight_type: InsightType::FlowState,
        kind: AnalysisKind::Behavioral,
        window_days: flow::WINDOW_DAYS,
        min_samples: flow::MIN_FLOW_SESSIONS,
        analyze: flow::analyze,
    },
    PatternFamily {
        insight_type: InsightType::PersonalGrowth,
        kind: AnalysisKind::Growth,
        window_days: growth::WINDOW_DAYS,
        min_samples: growth::MIN_SESSIONS_PER_HALF,
        analyze: growth::analyze,
    },
];

/// Families run by a cycle of the given kind.
pub fn families_for(kind: AnalysisKind) -> impl Iterator<Item = &'static PatternFamily> {
    FAMILIES.iter().filter(move |f| f.kind == kind)
}

/// Widest window any family of this kind reads.
pub fn max_window_days(kind: AnalysisKind) -> u32 {
    families_for(kind).map(|f| f.window_days).max().unwrap_or(0)
}

/// Bucket with the highest count; ties go to the earlier bucket of the day.
fn leading_bucket(counts: &BTreeMap<TimeOfDay, u32>) -> Option<(TimeOfDay, u32)> {
    TimeOfDay::ALL
        .iter()
        .filter_map(|t| counts.get(t).map(|c| (*t, *c)))
        .fold(None, |best, (t, c)| match best {
            Some((_, bc)) if bc >= c => best,
            _ => Some((t, c)),
        })
}

/// Bernoulli spread of a success ratio, in [0, 0.5].
fn outcome_spread(rate: f64) -> f64 {
    (rate * (1.0 - rate)).max(0.0).sqrt()
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::{json, Value};

    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::profile::Profile;
    use crate::domain::usage::{tools, EventWindow, UsageEvent};

    /// 2023-11-15 00:00:00 UTC.
    pub const NOW: i64 = 1_700_006_400;

    pub fn now() -> Timestamp {
        Timestamp::from_unix_secs(NOW)
    }

    pub fn profile() -> Profile {
        Profile::new(UserId::new("family-test").unwrap(), now())
    }

    /// Timestamp `days_ago` days before `NOW`, at `hour` UTC.
    pub fn at(days_ago: i64, hour: i64) -> Timestamp {
        Timestamp::from_unix_secs(NOW - days_ago * 86_400 + hour * 3_600)
    }

    pub fn event(tool: &str, context: Value, days_ago: i64, hour: i64) -> UsageEvent {
        UsageEvent::new(tool, context, at(days_ago, hour)).unwrap()
    }

    pub fn focus_session(days_ago: i64, hour: i64, minutes: f64, completed: bool, breaks: u64) -> UsageEvent {
        event(
            tools::FOCUS_TIMER,
            json!({"duration_minutes": minutes, "completed": completed, "breaks": breaks}),
            days_ago,
            hour,
        )
    }

    pub fn window(events: Vec<UsageEvent>) -> EventWindow {
        EventWindow::new(events, now())
    }
}
