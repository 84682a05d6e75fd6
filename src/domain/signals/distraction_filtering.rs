//! Distraction-filtering scoring: how much distractors slow responses down.

use super::indicators::SignalIndicators;
use super::sample::{GameKind, PerformanceSample};
use super::stats::{clamp_score, mean};

/// Scores a distraction-filtering session. `distance` is reaction time in ms;
/// samples flagged with a distractor form the distraction set, the rest the
/// baseline.
pub fn score(samples: &[PerformanceSample]) -> SignalIndicators {
    let (distracted, baseline): (Vec<&PerformanceSample>, Vec<&PerformanceSample>) = samples
        .iter()
        .partition(|s| s.context.distractor_present == Some(true));

    let Some(degradation) = degradation(&baseline, &distracted) else {
        let mut indicators = SignalIndicators::neutral(GameKind::DistractionFiltering, samples.len());
        indicators.error_rate = error_rate(samples);
        return indicators;
    };

    let mut indicators = SignalIndicators::scored(
        GameKind::DistractionFiltering,
        clamp_score(100.0 - degradation),
        samples.len(),
    );
    indicators.degradation_ratio = Some(degradation);
    indicators.error_rate = error_rate(samples);
    indicators
}

/// Percentage slowdown under distraction relative to baseline.
fn degradation(baseline: &[&PerformanceSample], distracted: &[&PerformanceSample]) -> Option<f64> {
    let baseline_rts: Vec<f64> = baseline.iter().map(|s| s.distance).collect();
    let distracted_rts: Vec<f64> = distracted.iter().map(|s| s.distance).collect();
    let base = mean(&baseline_rts)?;
    let under = mean(&distracted_rts)?;
    if base <= 0.0 {
        return None;
    }
    Some((under - base) / base * 100.0)
}

fn error_rate(samples: &[PerformanceSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let errors = samples.iter().filter(|s| !s.in_target).count();
    Some(errors as f64 / samples.len() as f64)
}
