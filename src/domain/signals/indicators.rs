//! Reduced output of one game session.

use serde::{Deserialize, Serialize};

use super::sample::GameKind;

/// Score used whenever a session lacks the data to compute a real one.
pub const NEUTRAL_SCORE: u8 = 50;

/// Minimum samples before a consistency metric is computed.
pub const MIN_CONSISTENCY_SAMPLES: usize = 10;

/// Named metrics derived from one game session. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalIndicators {
    pub game: GameKind,
    /// Overall game score, 0-100.
    pub score: u8,
    /// Well-formed samples that fed the metrics.
    pub sample_count: usize,
    /// True when the score is the neutral default because data was missing.
    #[serde(default)]
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lapse_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_cost_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degradation_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_reaction_ms: Option<f64>,
}

impl SignalIndicators {
    /// An indicator set with only a score.
    pub fn scored(game: GameKind, score: u8, sample_count: usize) -> Self {
        Self {
            game,
            score: score.min(100),
            sample_count,
            fallback: false,
            consistency: None,
            lapse_count: None,
            switch_cost_ms: None,
            degradation_ratio: None,
            error_rate: None,
            mean_reaction_ms: None,
        }
    }

    /// The documented neutral default for insufficient data.
    pub fn neutral(game: GameKind, sample_count: usize) -> Self {
        Self {
            fallback: true,
            ..Self::scored(game, NEUTRAL_SCORE, sample_count)
        }
    }
}

/// All indicator sets from one assessment sitting, at most one per game.
///
/// When a game was played more than once the most recent session wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    sessions: Vec<SignalIndicators>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, indicators: SignalIndicators) {
        self.sessions.retain(|s| s.game != indicators.game);
        self.sessions.push(indicators);
    }

    pub fn with(mut self, indicators: SignalIndicators) -> Self {
        self.insert(indicators);
        self
    }

    pub fn get(&self, game: GameKind) -> Option<&SignalIndicators> {
        self.sessions.iter().find(|s| s.game == game)
    }

    /// Indicator for a game, ignoring neutral fallbacks.
    pub fn measured(&self, game: GameKind) -> Option<&SignalIndicators> {
        self.get(game).filter(|s| !s.fallback)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl FromIterator<SignalIndicators> for IndicatorSet {
    fn from_iter<I: IntoIterator<Item = SignalIndicators>>(iter: I) -> Self {
        let mut set = IndicatorSet::new();
        for indicators in iter {
            set.insert(indicators);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_indicator_is_flagged() {
        let neutral = SignalIndicators::neutral(GameKind::TaskSwitching, 0);
        assert_eq!(neutral.score, NEUTRAL_SCORE);
        assert!(neutral.fallback);
    }

    #[test]
    fn indicator_set_keeps_latest_per_game() {
        let set: IndicatorSet = vec![
            SignalIndicators::scored(GameKind::ReactionTime, 40, 12),
            SignalIndicators::scored(GameKind::ReactionTime, 70, 15),
            SignalIndicators::scored(GameKind::SequenceMemory, 60, 5),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(GameKind::ReactionTime).unwrap().score, 70);
    }

    #[test]
    fn measured_skips_fallbacks() {
        let set = IndicatorSet::new().with(SignalIndicators::neutral(GameKind::SustainedAttention, 3));
        assert!(set.get(GameKind::SustainedAttention).is_some());
        assert!(set.measured(GameKind::SustainedAttention).is_none());
    }
}
