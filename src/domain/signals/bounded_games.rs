//! Sequence-memory and reaction-time scoring. Both are plain bounded maps.

use super::indicators::SignalIndicators;
use super::sample::{GameKind, PerformanceSample};
use super::stats::{clamp_score, mean};

/// Points per item of the longest correctly recalled sequence.
pub const SEQUENCE_MULTIPLIER: f64 = 10.0;

/// Latency that maps to a perfect reaction score.
pub const FAST_REACTION_MS: f64 = 200.0;

/// Latency that maps to a zero reaction score.
pub const SLOW_REACTION_MS: f64 = 800.0;

pub fn score_sequence_memory(samples: &[PerformanceSample]) -> SignalIndicators {
    let longest = samples
        .iter()
        .filter(|s| s.in_target)
        .filter_map(|s| s.context.sequence_length)
        .max();

    let Some(longest) = longest else {
        return SignalIndicators::neutral(GameKind::SequenceMemory, samples.len());
    };

    let mut indicators = SignalIndicators::scored(
        GameKind::SequenceMemory,
        clamp_score(longest as f64 * SEQUENCE_MULTIPLIER),
        samples.len(),
    );
    indicators.error_rate = Some(miss_share(samples));
    indicators
}

pub fn score_reaction_time(samples: &[PerformanceSample]) -> SignalIndicators {
    let correct: Vec<f64> = samples
        .iter()
        .filter(|s| s.in_target)
        .map(|s| s.distance)
        .collect();

    let Some(mean_ms) = mean(&correct) else {
        return SignalIndicators::neutral(GameKind::ReactionTime, samples.len());
    };

    let span = SLOW_REACTION_MS - FAST_REACTION_MS;
    let raw = (SLOW_REACTION_MS - mean_ms) / span * 100.0;

    let mut indicators =
        SignalIndicators::scored(GameKind::ReactionTime, clamp_score(raw), samples.len());
    indicators.mean_reaction_ms = Some(mean_ms);
    indicators.error_rate = Some(miss_share(samples));
    indicators
}

fn miss_share(samples: &[PerformanceSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().filter(|s| !s.in_target).count() as f64 / samples.len() as f64
}
