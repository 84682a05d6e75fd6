//! Recommendations: user-facing views over insights. Never persisted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::InsightId;
use crate::domain::insights::InsightType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    /// `High` when confidence clears the presentation threshold.
    pub fn for_confidence(confidence: f64, threshold: f64) -> Self {
        if confidence > threshold {
            Priority::High
        } else {
            Priority::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Originating insight, used to route feedback.
    pub insight_id: InsightId,
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub confidence: f64,
}
