//! Sustained-attention scoring: keep a cursor on a moving target.

use super::indicators::{SignalIndicators, MIN_CONSISTENCY_SAMPLES};
use super::sample::{GameKind, PerformanceSample};
use super::stats::{clamp_score, std_dev};

/// Trailing window inspected for attention lapses.
pub const LAPSE_WINDOW: usize = 10;

/// Samples outside the target (out of `LAPSE_WINDOW`) that make a lapse.
pub const LAPSE_OUTSIDE_THRESHOLD: usize = 8;

/// Per-sample recency decay applied to the basic score.
pub const RECENCY_DECAY: f64 = 0.98;

/// Penalty tiers keyed on the standard deviation of the distance.
const HIGH_VARIABILITY_SD: f64 = 30.0;
const HIGH_VARIABILITY_PENALTY: f64 = 15.0;
const MODERATE_VARIABILITY_SD: f64 = 20.0;
const MODERATE_VARIABILITY_PENALTY: f64 = 10.0;

/// Scores a sustained-attention session.
///
/// Fewer than ten samples only yield coarse metrics and the neutral score.
pub fn score(samples: &[PerformanceSample]) -> SignalIndicators {
    let n = samples.len();
    if n < MIN_CONSISTENCY_SAMPLES {
        let mut indicators = SignalIndicators::neutral(GameKind::SustainedAttention, n);
        indicators.error_rate = error_rate(samples);
        return indicators;
    }

    let distances: Vec<f64> = samples.iter().map(|s| s.distance).collect();
    let sd = std_dev(&distances).unwrap_or(0.0);
    let consistency = (100.0 - 2.0 * sd).max(0.0);
    let final_score = basic_score(samples) - variability_penalty(sd);

    let mut indicators =
        SignalIndicators::scored(GameKind::SustainedAttention, clamp_score(final_score), n);
    indicators.consistency = Some(consistency);
    indicators.lapse_count = Some(count_lapses(samples));
    indicators.error_rate = error_rate(samples);
    indicators
}

/// Recency-weighted share of samples inside the target, on a 0-100 scale.
///
/// The newest sample has weight 1 and each older sample is discounted by
/// `RECENCY_DECAY`.
pub fn basic_score(samples: &[PerformanceSample]) -> f64 {
    let n = samples.len();
    if n == 0 {
        return 0.0;
    }
    let (hit, total) = samples
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(hit, total), (i, sample)| {
            let weight = RECENCY_DECAY.powi((n - 1 - i) as i32);
            let hit = if sample.in_target { hit + weight } else { hit };
            (hit, total + weight)
        });
    100.0 * hit / total
}

/// Two-tier penalty for erratic tracking.
pub fn variability_penalty(sd: f64) -> f64 {
    if sd > HIGH_VARIABILITY_SD {
        HIGH_VARIABILITY_PENALTY
    } else if sd > MODERATE_VARIABILITY_SD {
        MODERATE_VARIABILITY_PENALTY
    } else {
        0.0
    }
}

/// Counts entries into a lapse state.
///
/// From the tenth sample on, the trailing ten samples are lapsing when at
/// least eight are outside the target. Each transition into that state counts
/// once, so one contiguous burst is one lapse and separate bursts each count.
pub fn count_lapses(samples: &[PerformanceSample]) -> u32 {
    if samples.len() < LAPSE_WINDOW {
        return 0;
    }
    let mut lapses = 0;
    let mut lapsing = false;
    for window in samples.windows(LAPSE_WINDOW) {
        let outside = window.iter().filter(|s| !s.in_target).count();
        let now_lapsing = outside >= LAPSE_OUTSIDE_THRESHOLD;
        if now_lapsing && !lapsing {
            lapses += 1;
        }
        lapsing = now_lapsing;
    }
    lapses
}

fn error_rate(samples: &[PerformanceSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let misses = samples.iter().filter(|s| !s.in_target).count();
    Some(misses as f64 / samples.len() as f64)
}
