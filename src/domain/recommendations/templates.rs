//! Static insight-type to recommendation template table.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

use super::recommendation::{Priority, Recommendation};
use crate::domain::insights::{GrowthMetric, Insight, InsightPayload, InsightType, ToolAction};

/// Title and payload-specific description for one insight type.
#[derive(Clone, Copy)]
pub struct Template {
    pub title: &'static str,
    pub describe: fn(&InsightPayload) -> Option<String>,
}

static TEMPLATES: Lazy<HashMap<InsightType, Template>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        InsightType::FocusTiming,
        Template {
            title: "Your best focus time",
            describe: describe_focus_timing,
        },
    );
    map.insert(
        InsightType::HyperfocusIntensity,
        Template {
            title: "Long sessions are running over",
            describe: describe_hyperfocus,
        },
    );
    map.insert(
        InsightType::ToolEffectiveness,
        Template {
            title: "How your tools are working",
            describe: describe_tool_effectiveness,
        },
    );
    map.insert(
        InsightType::ContextualPreference,
        Template {
            title: "A go-to tool for this activity",
            describe: describe_contextual_preference,
        },
    );
    map.insert(
        InsightType::StressPatterns,
        Template {
            title: "A pattern in tough moments",
            describe: describe_stress,
        },
    );
    map.insert(
        InsightType::FlowState,
        Template {
            title: "You find flow in longer sessions",
            describe: describe_flow,
        },
    );
    map.insert(
        InsightType::PersonalGrowth,
        Template {
            title: "You are making progress",
            describe: describe_growth,
        },
    );
    map
});

pub fn template_for(insight_type: InsightType) -> Option<&'static Template> {
    TEMPLATES.get(&insight_type)
}

/// Maps an insight to its recommendation.
///
/// Unrecognised types yield `None` and a warning rather than an error.
pub fn recommend(insight: &Insight, threshold: f64) -> Option<Recommendation> {
    let insight_type = insight.insight_type();
    let Some(template) = template_for(insight_type) else {
        warn!(insight_id = %insight.id(), insight_type = %insight_type, "No template for insight type, skipping");
        return None;
    };
    let Some(description) = (template.describe)(insight.payload()) else {
        warn!(insight_id = %insight.id(), insight_type = %insight_type, "Template rejected payload, skipping");
        return None;
    };
    Some(Recommendation {
        insight_id: insight.id(),
        insight_type,
        title: template.title.to_string(),
        description,
        priority: Priority::for_confidence(insight.confidence(), threshold),
        confidence: insight.confidence(),
    })
}

fn describe_focus_timing(payload: &InsightPayload) -> Option<String> {
    match payload {
        InsightPayload::FocusTiming { best_time, successful_sessions, .. } => Some(format!(
            "{} of your recent completed focus sessions happened in the {}. Try scheduling demanding work then.",
            successful_sessions,
            best_time.label()
        )),
        _ => None,
    }
}

fn describe_hyperfocus(payload: &InsightPayload) -> Option<String> {
    match payload {
        InsightPayload::HyperfocusIntensity { long_sessions, mean_minutes, warning_minutes } => {
            Some(format!(
                "{} sessions this week averaged {:.0} minutes, well past your {} minute check-in. A firmer break reminder may help.",
                long_sessions, mean_minutes, warning_minutes
            ))
        }
        _ => None,
    }
}

fn describe_tool_effectiveness(payload: &InsightPayload) -> Option<String> {
    match payload {
        InsightPayload::ToolEffectiveness { tool_id, activity, success_rate, action, .. } => {
            let percent = (success_rate * 100.0).round();
            Some(match action {
                ToolAction::Promote => format!(
                    "{} helped {}% of the time during {}. Pin it so it is always one tap away.",
                    tool_id, percent, activity
                ),
                ToolAction::Reconsider => format!(
                    "{} only helped {}% of the time during {}. Consider trying a different tool.",
                    tool_id, percent, activity
                ),
            })
        }
        _ => None,
    }
}

fn describe_contextual_preference(payload: &InsightPayload) -> Option<String> {
    match payload {
        InsightPayload::ContextualPreference { activity, tool_id, share, .. } => Some(format!(
            "You reach for {} in {:.0}% of {} sessions. Make it the default for {}?",
            tool_id,
            share * 100.0,
            activity,
            activity
        )),
        _ => None,
    }
}

fn describe_stress(payload: &InsightPayload) -> Option<String> {
    match payload {
        InsightPayload::StressPatterns { events, peak_time, trigger_activity } => {
            let during = trigger_activity
                .as_deref()
                .map(|a| format!(", often during {}", a))
                .unwrap_or_default();
            Some(format!(
                "You needed a break {} times recently, mostly in the {}{}. Planning a calm-down step ahead of time may help.",
                events,
                peak_time.label(),
                during
            ))
        }
        _ => None,
    }
}

fn describe_flow(payload: &InsightPayload) -> Option<String> {
    match payload {
        InsightPayload::FlowState { sessions, mean_minutes } => Some(format!(
            "{} uninterrupted sessions averaged {:.0} minutes. Your focus timer could default to that length.",
            sessions, mean_minutes
        )),
        _ => None,
    }
}

fn describe_growth(payload: &InsightPayload) -> Option<String> {
    match payload {
        InsightPayload::PersonalGrowth { metric, before, after } => Some(match metric {
            GrowthMetric::CompletionRate => format!(
                "You finished {:.0}% of focus sessions lately, up from {:.0}%.",
                after * 100.0,
                before * 100.0
            ),
            GrowthMetric::OverwhelmReduction => format!(
                "Overwhelm moments dropped from {:.0} to {:.0} over the last month.",
                before, after
            ),
        }),
        _ => None,
    }
}
