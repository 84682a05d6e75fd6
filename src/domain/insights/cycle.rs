//! Analysis cycle phases and the report one cycle produces.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::insight::{Insight, InsightType};
use crate::domain::foundation::StateMachine;

/// Which cadence a cycle runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    /// Hourly: timing, hyperfocus, tools, context, stress, flow.
    Behavioral,
    /// Daily: long-range growth trends.
    Growth,
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisKind::Behavioral => write!(f, "behavioral"),
            AnalysisKind::Growth => write!(f, "growth"),
        }
    }
}

/// Phase of one analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    Idle,
    /// Reading the trailing event window.
    Windowing,
    /// Grouping events and computing per-group statistics.
    PerContextAggregation,
    /// Applying sample gates, confidence and cool-downs.
    ThresholdCheck,
    /// At least one new insight was appended.
    InsightEmitted,
}

impl StateMachine for CyclePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CyclePhase::*;
        matches!(
            (self, target),
            (Idle, Windowing)
                | (Windowing, PerContextAggregation)
                | (Windowing, Idle) // Empty window
                | (PerContextAggregation, ThresholdCheck)
                | (ThresholdCheck, InsightEmitted)
                | (ThresholdCheck, Idle)
                | (InsightEmitted, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CyclePhase::*;
        match self {
            Idle => vec![Windowing],
            Windowing => vec![PerContextAggregation, Idle],
            PerContextAggregation => vec![ThresholdCheck],
            ThresholdCheck => vec![InsightEmitted, Idle],
            InsightEmitted => vec![Idle],
        }
    }
}

/// Why a family did not emit this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum GateReason {
    /// Fewer observations than the family's minimum.
    InsufficientData { observed: u32, required: u32 },
    /// Enough data, but nothing crossed the family's threshold.
    NoSignal,
    /// An equivalent or contradictory insight was emitted within the cool-down.
    CoolingDown,
    /// The user already accepted or rejected this same finding.
    AlreadyResolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateOutcome {
    pub insight_type: InsightType,
    #[serde(flatten)]
    pub reason: GateReason,
}

impl GateOutcome {
    pub fn insufficient(insight_type: InsightType, observed: usize, required: u32) -> Self {
        Self {
            insight_type,
            reason: GateReason::InsufficientData {
                observed: u32::try_from(observed).unwrap_or(u32::MAX),
                required,
            },
        }
    }

    pub fn no_signal(insight_type: InsightType) -> Self {
        Self {
            insight_type,
            reason: GateReason::NoSignal,
        }
    }

    pub fn cooling_down(insight_type: InsightType) -> Self {
        Self {
            insight_type,
            reason: GateReason::CoolingDown,
        }
    }

    pub fn already_resolved(insight_type: InsightType) -> Self {
        Self {
            insight_type,
            reason: GateReason::AlreadyResolved,
        }
    }
}

/// Result of one analysis cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub kind: AnalysisKind,
    /// Phase the cycle finished in: `InsightEmitted` or `Idle`.
    pub phase: CyclePhase,
    pub window_events: usize,
    pub emitted: Vec<Insight>,
    pub gates: Vec<GateOutcome>,
    pub pruned: usize,
}

impl CycleReport {
    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_reaches_insight_emitted() {
        let phase = CyclePhase::Idle
            .transition_to(CyclePhase::Windowing)
            .and_then(|p| p.transition_to(CyclePhase::PerContextAggregation))
            .and_then(|p| p.transition_to(CyclePhase::ThresholdCheck))
            .and_then(|p| p.transition_to(CyclePhase::InsightEmitted));
        assert_eq!(phase, Ok(CyclePhase::InsightEmitted));
    }

    #[test]
    fn empty_window_returns_to_idle() {
        assert!(CyclePhase::Windowing.can_transition_to(&CyclePhase::Idle));
    }

    #[test]
    fn cannot_skip_threshold_check() {
        assert!(CyclePhase::PerContextAggregation
            .transition_to(CyclePhase::InsightEmitted)
            .is_err());
        assert!(CyclePhase::Idle.transition_to(CyclePhase::ThresholdCheck).is_err());
    }

    #[test]
    fn valid_transitions_agree_with_can_transition_to() {
        use CyclePhase::*;
        let all = [Idle, Windowing, PerContextAggregation, ThresholdCheck, InsightEmitted];
        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn no_phase_is_terminal() {
        assert!(!CyclePhase::InsightEmitted.is_terminal());
        assert!(!CyclePhase::Idle.is_terminal());
    }

    #[test]
    fn gate_outcome_serializes_flat() {
        let gate = GateOutcome::insufficient(InsightType::FlowState, 2, 3);
        let json = serde_json::to_value(&gate).unwrap();
        assert_eq!(json["reason"], "insufficient_data");
        assert_eq!(json["observed"], 2);
        assert_eq!(json["insight_type"], "flow_state");
    }
}
