//! Raw telemetry readings from one diagnostic game session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic mini-game families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    SustainedAttention,
    TaskSwitching,
    DistractionFiltering,
    SequenceMemory,
    ReactionTime,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameKind::SustainedAttention => "sustained_attention",
            GameKind::TaskSwitching => "task_switching",
            GameKind::DistractionFiltering => "distraction_filtering",
            GameKind::SequenceMemory => "sequence_memory",
            GameKind::ReactionTime => "reaction_time",
        };
        write!(f, "{}", s)
    }
}

/// Game-specific context attached to a sample.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleContext {
    /// Current task rule in task-switching games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    /// Whether a distractor was on screen (distraction-filtering games).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distractor_present: Option<bool>,
    /// Length of the sequence attempted (sequence-memory games).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_length: Option<u32>,
}

/// One telemetry reading.
///
/// `distance` is spatial distance from the target for tracking games and
/// reaction time in milliseconds for response games. `in_target` doubles as
/// the "correct" flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    pub offset_ms: u64,
    pub distance: f64,
    pub in_target: bool,
    #[serde(default)]
    pub context: SampleContext,
}

impl PerformanceSample {
    pub fn new(offset_ms: u64, distance: f64, in_target: bool) -> Self {
        Self {
            offset_ms,
            distance,
            in_target,
            context: SampleContext::default(),
        }
    }

    pub fn with_task_type(mut self, task_type: impl Into<String>) -> Self {
        self.context.task_type = Some(task_type.into());
        self
    }

    pub fn with_distractor(mut self, present: bool) -> Self {
        self.context.distractor_present = Some(present);
        self
    }

    pub fn with_sequence_length(mut self, length: u32) -> Self {
        self.context.sequence_length = Some(length);
        self
    }

    /// Malformed readings (NaN, infinite or negative distances) are dropped
    /// before scoring.
    pub fn is_well_formed(&self) -> bool {
        self.distance.is_finite() && self.distance >= 0.0
    }
}

/// A completed game session as submitted by the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub game: GameKind,
    pub samples: Vec<PerformanceSample>,
}

impl GameSession {
    pub fn new(game: GameKind, samples: Vec<PerformanceSample>) -> Self {
        Self { game, samples }
    }
}
