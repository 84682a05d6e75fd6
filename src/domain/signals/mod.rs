//! Signals module - reduces diagnostic game telemetry to indicators.
//!
//! Each game family has its own scorer; `SignalExtractor` routes a session
//! to the right one. Scorers are pure and never fail: missing or sparse data
//! yields the neutral score of 50 with `fallback` set.

mod bounded_games;
mod distraction_filtering;
mod extractor;
mod indicators;
mod sample;
pub mod stats;
mod sustained_attention;
mod task_switching;

pub use extractor::SignalExtractor;
pub use indicators::{IndicatorSet, SignalIndicators, MIN_CONSISTENCY_SAMPLES, NEUTRAL_SCORE};
pub use sample::{GameKind, GameSession, PerformanceSample, SampleContext};
