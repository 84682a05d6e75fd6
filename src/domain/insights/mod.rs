//! Insights module - unsupervised pattern mining over usage history.
//!
//! # Components
//!
//! - `PatternRecognizer` - runs one analysis cycle over an `EventWindow`
//! - `FAMILIES` - pure per-family analyses with their windows and gates
//! - `ConfidenceModel` - swappable evidence-to-confidence scoring
//! - `InsightLog` - append-only per-user log with cool-down and pruning
//!
//! # Cycle
//!
//! `Idle -> Windowing -> PerContextAggregation -> ThresholdCheck ->
//! (InsightEmitted | Idle)`. A cycle never fails: missing data is reported
//! as a `GateOutcome` and the cycle ends idle.

mod confidence;
mod cycle;
mod families;
mod insight;
mod log;
mod recognizer;

pub use confidence::{ConfidenceModel, Evidence, HeuristicConfidence};
pub use cycle::{AnalysisKind, CyclePhase, CycleReport, GateOutcome, GateReason};
pub use families::{
    families_for, max_window_days, Candidate, FamilyOutcome, PatternFamily, FAMILIES,
    PROMOTE_MIN_USES, PROMOTE_SUCCESS_RATE, RECONSIDER_SUCCESS_RATE,
};
pub use insight::{
    fingerprint, GrowthMetric, Insight, InsightPayload, InsightType, ToolAction,
};
pub use log::InsightLog;
pub use recognizer::{PatternRecognizer, RecognizerSettings};
