//! Signal Extractor - dispatches one game session to its family scorer.

use tracing::debug;

use super::bounded_games::{score_reaction_time, score_sequence_memory};
use super::indicators::SignalIndicators;
use super::sample::{GameKind, GameSession, PerformanceSample};
use super::{distraction_filtering, sustained_attention, task_switching};

/// Stateless extractor: a pure function of one session's samples.
pub struct SignalExtractor;

impl SignalExtractor {
    /// Reduces a session to its indicator set. Never fails; malformed samples
    /// are dropped and sparse sessions fall back to the neutral score.
    pub fn extract(session: &GameSession) -> SignalIndicators {
        let samples: Vec<PerformanceSample> = session
            .samples
            .iter()
            .filter(|s| s.is_well_formed())
            .cloned()
            .collect();

        let dropped = session.samples.len() - samples.len();
        if dropped > 0 {
            debug!(game = %session.game, dropped, "Discarded malformed samples");
        }

        let indicators = match session.game {
            GameKind::SustainedAttention => sustained_attention::score(&samples),
            GameKind::TaskSwitching => task_switching::score(&samples),
            GameKind::DistractionFiltering => distraction_filtering::score(&samples),
            GameKind::SequenceMemory => score_sequence_memory(&samples),
            GameKind::ReactionTime => score_reaction_time(&samples),
        };

        debug!(
            game = %session.game,
            score = indicators.score,
            samples = indicators.sample_count,
            fallback = indicators.fallback,
            "Extracted signal indicators"
        );
        indicators
    }
}
