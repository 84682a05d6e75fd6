//! Pattern Recognizer - one analysis cycle over a snapshot of the event log.

use std::sync::Arc;

use tracing::{debug, info};

use super::confidence::{ConfidenceModel, HeuristicConfidence};
use super::cycle::{AnalysisKind, CyclePhase, CycleReport, GateOutcome};
use super::families::{families_for, FamilyOutcome};
use super::insight::Insight;
use super::log::InsightLog;
use crate::domain::foundation::StateMachine;
use crate::domain::profile::Profile;
use crate::domain::usage::EventWindow;

/// Thresholds and retention limits for analysis cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizerSettings {
    pub insight_cooldown_hours: u32,
    pub growth_cooldown_hours: u32,
    /// Confidence above which an insight is presentable on first sight.
    pub presentation_threshold: f64,
    pub retention_days: u32,
    pub max_retained: usize,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            insight_cooldown_hours: 24,
            growth_cooldown_hours: 168,
            presentation_threshold: 0.8,
            retention_days: 90,
            max_retained: 200,
        }
    }
}

impl RecognizerSettings {
    fn cooldown_hours(&self, kind: AnalysisKind) -> u32 {
        match kind {
            AnalysisKind::Behavioral => self.insight_cooldown_hours,
            AnalysisKind::Growth => self.growth_cooldown_hours,
        }
    }
}

/// Runs pattern families over an event window and appends new insights.
///
/// Holds no per-run state, so one recognizer may serve many users.
#[derive(Clone)]
pub struct PatternRecognizer {
    settings: RecognizerSettings,
    confidence: Arc<dyn ConfidenceModel>,
}

impl PatternRecognizer {
    pub fn new(settings: RecognizerSettings) -> Self {
        Self {
            settings,
            confidence: Arc::new(HeuristicConfidence),
        }
    }

    pub fn with_confidence_model(mut self, model: Arc<dyn ConfidenceModel>) -> Self {
        self.confidence = model;
        self
    }

    pub fn settings(&self) -> &RecognizerSettings {
        &self.settings
    }

    /// Runs one cycle, appending emitted insights to `log` and pruning it.
    ///
    /// Evaluation time is `window.as_of()`. Re-running on an unchanged
    /// window within the cool-down emits nothing.
    pub fn run(
        &self,
        kind: AnalysisKind,
        profile: &Profile,
        window: &EventWindow,
        log: &mut InsightLog,
    ) -> CycleReport {
        let now = window.as_of();
        let user_id = profile.user_id();
        let mut phase = CyclePhase::Idle;
        let mut gates = Vec::new();
        let mut emitted = Vec::new();

        advance(&mut phase, CyclePhase::Windowing);
        debug!(user_id = %user_id, kind = %kind, events = window.len(), "Analysis window read");

        if window.is_empty() {
            for family in families_for(kind) {
                gates.push(GateOutcome::insufficient(family.insight_type, 0, family.min_samples));
            }
            advance(&mut phase, CyclePhase::Idle);
            let pruned = log.prune(now, self.settings.retention_days, self.settings.max_retained);
            return CycleReport {
                kind,
                phase,
                window_events: 0,
                emitted,
                gates,
                pruned,
            };
        }

        advance(&mut phase, CyclePhase::PerContextAggregation);
        let mut candidates = Vec::new();
        for family in families_for(kind) {
            match (family.analyze)(profile, window) {
                FamilyOutcome::Candidates(found) => {
                    candidates.extend(found.into_iter().map(|c| (family.window_days, c)));
                }
                FamilyOutcome::Gated(gate) => {
                    debug!(user_id = %user_id, insight_type = %gate.insight_type, reason = ?gate.reason, "Family gated");
                    gates.push(gate);
                }
            }
        }

        advance(&mut phase, CyclePhase::ThresholdCheck);
        let cooldown = self.settings.cooldown_hours(kind);
        for (window_days, candidate) in candidates {
            let confidence = self.confidence.score(&candidate.evidence);
            let insight = Insight::new(
                candidate.payload,
                confidence,
                candidate.evidence.sample_count,
                window_days,
                now,
            );
            let insight_type = insight.insight_type();

            if log.in_cooldown(insight.fingerprint(), now, cooldown) {
                debug!(user_id = %user_id, insight_type = %insight_type, topic = %insight.topic(), "Insight cooling down");
                gates.push(GateOutcome::cooling_down(insight_type));
                continue;
            }

            if log.resolved_alike(&insight) {
                debug!(user_id = %user_id, insight_type = %insight_type, topic = %insight.topic(), "Insight already resolved");
                gates.push(GateOutcome::already_resolved(insight_type));
                continue;
            }

            let reinforced = log.has_prior(insight_type, &insight.topic());
            let presentable = confidence > self.settings.presentation_threshold || reinforced;
            let insight = insight.with_presentable(presentable);

            info!(
                user_id = %user_id,
                insight_type = %insight_type,
                confidence,
                presentable,
                reinforced,
                "Insight emitted"
            );
            log.append(insight.clone());
            emitted.push(insight);
        }

        let next = if emitted.is_empty() {
            CyclePhase::Idle
        } else {
            CyclePhase::InsightEmitted
        };
        advance(&mut phase, next);

        let pruned = log.prune(now, self.settings.retention_days, self.settings.max_retained);
        CycleReport {
            kind,
            phase,
            window_events: window.len(),
            emitted,
            gates,
            pruned,
        }
    }
}

fn advance(phase: &mut CyclePhase, next: CyclePhase) {
    debug_assert!(phase.can_transition_to(&next), "{:?} -> {:?}", phase, next);
    *phase = next;
}
