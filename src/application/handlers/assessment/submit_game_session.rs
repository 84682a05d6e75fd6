//! SubmitGameSession - Command handler reducing one game session to indicators.

use tracing::info;

use crate::domain::foundation::CommandMetadata;
use crate::domain::signals::{GameSession, SignalExtractor, SignalIndicators};

/// Command carrying the raw telemetry of one finished game.
#[derive(Debug, Clone)]
pub struct SubmitGameSessionCommand {
    pub session: GameSession,
}

/// Stateless: extraction is pure and never fails.
#[derive(Debug, Default)]
pub struct SubmitGameSessionHandler;

impl SubmitGameSessionHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: SubmitGameSessionCommand, metadata: &CommandMetadata) -> SignalIndicators {
        let indicators = SignalExtractor::extract(&cmd.session);
        info!(
            user_id = %metadata.user_id,
            game = %indicators.game,
            score = indicators.score,
            fallback = indicators.fallback,
            "Game session scored"
        );
        indicators
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::signals::{GameKind, PerformanceSample, NEUTRAL_SCORE};

    #[test]
    fn empty_distraction_session_scores_neutral() {
        let handler = SubmitGameSessionHandler::new();
        let metadata = CommandMetadata::new(UserId::new("learner-1").unwrap());
        let cmd = SubmitGameSessionCommand {
            session: GameSession::new(GameKind::DistractionFiltering, Vec::new()),
        };

        let indicators = handler.handle(cmd, &metadata);
        assert_eq!(indicators.score, NEUTRAL_SCORE);
        assert!(indicators.fallback);
    }

    #[test]
    fn sequence_memory_scores_longest_correct_span() {
        let handler = SubmitGameSessionHandler::new();
        let metadata = CommandMetadata::new(UserId::new("learner-1").unwrap());
        let samples = vec![
            PerformanceSample::new(0, 0.0, true).with_sequence_length(4),
            PerformanceSample::new(5_000, 0.0, true).with_sequence_length(6),
            PerformanceSample::new(9_000, 0.0, false).with_sequence_length(7),
        ];
        let cmd = SubmitGameSessionCommand {
            session: GameSession::new(GameKind::SequenceMemory, samples),
        };

        assert_eq!(handler.handle(cmd, &metadata).score, 60);
    }
}
