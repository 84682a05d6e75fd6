//! Task-switching scoring: alternate between rules and measure the cost.

use super::indicators::SignalIndicators;
use super::sample::{GameKind, PerformanceSample};
use super::stats::{clamp_score, mean};

/// Non-switch trials needed before a switch cost is trusted.
pub const MIN_NON_SWITCH_TRIALS: usize = 5;

const ERROR_PENALTY: f64 = 5.0;
const HIGH_COST_MS: f64 = 500.0;
const HIGH_COST_PENALTY: f64 = 20.0;
const MODERATE_COST_MS: f64 = 300.0;
const MODERATE_COST_PENALTY: f64 = 10.0;

/// Scores a task-switching session. Each sample is one trial; `distance`
/// holds the reaction time in milliseconds.
pub fn score(trials: &[PerformanceSample]) -> SignalIndicators {
    if trials.is_empty() {
        return SignalIndicators::neutral(GameKind::TaskSwitching, 0);
    }

    let errors = trials.iter().filter(|t| !t.in_target).count();
    let cost = switch_cost(trials);

    let final_score = 100.0 - ERROR_PENALTY * errors as f64 - cost.map(cost_penalty).unwrap_or(0.0);

    let mut indicators =
        SignalIndicators::scored(GameKind::TaskSwitching, clamp_score(final_score), trials.len());
    indicators.switch_cost_ms = cost;
    indicators.error_rate = Some(errors as f64 / trials.len() as f64);
    indicators
}

/// Mean reaction time on switch trials minus mean on non-switch trials.
///
/// `None` when there are fewer than five non-switch trials or no switch at all.
pub fn switch_cost(trials: &[PerformanceSample]) -> Option<f64> {
    let mut switch_rts = Vec::new();
    let mut repeat_rts = Vec::new();
    let mut previous: Option<&str> = None;

    for trial in trials {
        let current = trial.context.task_type.as_deref();
        let switched = matches!((previous, current), (Some(p), Some(c)) if p != c);
        if switched {
            switch_rts.push(trial.distance);
        } else {
            repeat_rts.push(trial.distance);
        }
        if current.is_some() {
            previous = current;
        }
    }

    if repeat_rts.len() < MIN_NON_SWITCH_TRIALS {
        return None;
    }
    Some(mean(&switch_rts)? - mean(&repeat_rts)?)
}

pub fn cost_penalty(cost_ms: f64) -> f64 {
    if cost_ms > HIGH_COST_MS {
        HIGH_COST_PENALTY
    } else if cost_ms > MODERATE_COST_MS {
        MODERATE_COST_PENALTY
    } else {
        0.0
    }
}
