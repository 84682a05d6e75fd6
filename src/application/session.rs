//! PersonalizationSession - the engine surface for one learner.
//!
//! A session owns the learner's profile writer and wires the handlers to
//! injected ports. There is no process-wide state: everything a session
//! touches is reachable from its own fields.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use super::handlers::{
    GetPendingRecommendationHandler, RecordUsageCommand, RecordUsageHandler,
    ResolveRecommendationCommand, ResolveRecommendationHandler, ResolveRecommendationResult,
    RunAnalysisCycleCommand, RunAnalysisCycleHandler, SubmitAssessmentCommand,
    SubmitAssessmentHandler, SubmitGameSessionCommand, SubmitGameSessionHandler,
};
use super::ProfileWriter;
use crate::domain::assessment::AssessmentAnswers;
use crate::domain::foundation::{CommandMetadata, DomainError, InsightId, UserId};
use crate::domain::insights::{AnalysisKind, CycleReport, PatternRecognizer, RecognizerSettings};
use crate::domain::profile::Profile;
use crate::domain::recommendations::{PresentationPolicy, Recommendation};
use crate::domain::signals::{GameSession, IndicatorSet, SignalIndicators};
use crate::domain::usage::{ContextSnapshot, UsageEvent};
use crate::ports::{Clock, EventLog, InsightStore, ProfileStore};

/// The collaborators a session reads and writes through.
#[derive(Clone)]
pub struct EnginePorts {
    pub profile_store: Arc<dyn ProfileStore>,
    pub event_log: Arc<dyn EventLog>,
    pub insight_store: Arc<dyn InsightStore>,
    pub clock: Arc<dyn Clock>,
}

/// Tunables shared by every session of an engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSettings {
    pub recognizer: RecognizerSettings,
    pub presentation: PresentationPolicy,
}

pub struct PersonalizationSession {
    user_id: UserId,
    clock: Arc<dyn Clock>,
    writer: Arc<ProfileWriter>,
    /// Indicators from games played in this session, latest per game.
    indicators: Mutex<IndicatorSet>,
    games: SubmitGameSessionHandler,
    assessment: SubmitAssessmentHandler,
    usage: RecordUsageHandler,
    pending: GetPendingRecommendationHandler,
    resolve: ResolveRecommendationHandler,
    analysis: RunAnalysisCycleHandler,
}

impl PersonalizationSession {
    pub fn new(user_id: UserId, ports: &EnginePorts, settings: &SessionSettings) -> Self {
        Self::with_recognizer(
            user_id,
            ports,
            settings,
            PatternRecognizer::new(settings.recognizer.clone()),
        )
    }

    /// Same as `new` but with a caller-built recognizer, e.g. one carrying
    /// a different confidence model.
    pub fn with_recognizer(
        user_id: UserId,
        ports: &EnginePorts,
        settings: &SessionSettings,
        recognizer: PatternRecognizer,
    ) -> Self {
        let writer = Arc::new(ProfileWriter::new(user_id.clone(), ports.profile_store.clone()));
        let log_lock = Arc::new(Mutex::new(()));
        Self {
            clock: ports.clock.clone(),
            indicators: Mutex::new(IndicatorSet::new()),
            games: SubmitGameSessionHandler::new(),
            assessment: SubmitAssessmentHandler::new(writer.clone()),
            usage: RecordUsageHandler::new(ports.event_log.clone()),
            pending: GetPendingRecommendationHandler::new(
                ports.insight_store.clone(),
                settings.presentation.clone(),
            ),
            resolve: ResolveRecommendationHandler::new(
                ports.insight_store.clone(),
                writer.clone(),
                log_lock.clone(),
            ),
            analysis: RunAnalysisCycleHandler::new(
                ports.event_log.clone(),
                ports.insight_store.clone(),
                writer.clone(),
                recognizer,
                log_lock,
            ),
            writer,
            user_id,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata::at(self.user_id.clone(), self.clock.now())
    }

    /// Score one game session. The result is also kept for the next
    /// assessment via `collected_indicators`.
    pub async fn submit_game_session(&self, session: GameSession) -> SignalIndicators {
        let indicators = self
            .games
            .handle(SubmitGameSessionCommand { session }, &self.metadata());
        self.indicators.lock().await.insert(indicators.clone());
        indicators
    }

    /// Indicators from every game scored in this session so far.
    pub async fn collected_indicators(&self) -> IndicatorSet {
        self.indicators.lock().await.clone()
    }

    pub async fn submit_assessment(
        &self,
        answers: AssessmentAnswers,
        indicators: IndicatorSet,
    ) -> Result<Profile, DomainError> {
        self.assessment
            .handle(SubmitAssessmentCommand { answers, indicators }, &self.metadata())
            .await
    }

    pub async fn record_usage(
        &self,
        tool_id: impl Into<String>,
        context: Value,
        snapshot: ContextSnapshot,
    ) -> Result<UsageEvent, DomainError> {
        let cmd = RecordUsageCommand::new(tool_id, context).with_snapshot(snapshot);
        self.usage.handle(cmd, &self.metadata()).await
    }

    pub async fn get_pending_recommendation(&self) -> Result<Option<Recommendation>, DomainError> {
        self.pending.handle(&self.metadata()).await
    }

    pub async fn resolve_recommendation(
        &self,
        insight_id: InsightId,
        accepted: bool,
    ) -> Result<ResolveRecommendationResult, DomainError> {
        self.resolve
            .handle(ResolveRecommendationCommand { insight_id, accepted }, &self.metadata())
            .await
    }

    pub async fn run_analysis_cycle(&self, kind: AnalysisKind) -> Result<CycleReport, DomainError> {
        self.analysis
            .handle(RunAnalysisCycleCommand { kind }, &self.metadata())
            .await
    }

    /// The in-memory profile, which is authoritative until a pending write
    /// succeeds.
    pub async fn profile(&self) -> Result<Profile, DomainError> {
        self.writer.current(self.clock.now()).await
    }

    /// Retry a profile write that failed earlier.
    pub async fn flush_profile(&self) -> Result<bool, DomainError> {
        self.writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryEventLog, InMemoryInsightStore, InMemoryProfileStore, ManualClock};
    use crate::domain::foundation::Timestamp;
    use crate::domain::signals::{GameKind, PerformanceSample};

    fn ports() -> EnginePorts {
        EnginePorts {
            profile_store: Arc::new(InMemoryProfileStore::new()),
            event_log: Arc::new(InMemoryEventLog::new()),
            insight_store: Arc::new(InMemoryInsightStore::new()),
            clock: Arc::new(ManualClock::at(Timestamp::from_unix_secs(1_700_000_000))),
        }
    }

    #[tokio::test]
    async fn scored_games_are_collected_latest_per_game() {
        let session = PersonalizationSession::new(
            UserId::new("learner-1").unwrap(),
            &ports(),
            &SessionSettings::default(),
        );
        let memory = |length| {
            GameSession::new(
                GameKind::SequenceMemory,
                vec![PerformanceSample::new(0, 0.0, true).with_sequence_length(length)],
            )
        };

        session.submit_game_session(memory(4)).await;
        session.submit_game_session(memory(7)).await;

        let collected = session.collected_indicators().await;
        assert_eq!(collected.len(), 1);
        assert_eq!(collected.get(GameKind::SequenceMemory).unwrap().score, 70);
    }

    #[tokio::test]
    async fn profile_defaults_before_any_write() {
        let session = PersonalizationSession::new(
            UserId::new("learner-1").unwrap(),
            &ports(),
            &SessionSettings::default(),
        );
        let profile = session.profile().await.unwrap();
        assert_eq!(profile.user_id().as_str(), "learner-1");
        assert!(profile.ruleset_version().is_none());
        assert!(!session.flush_profile().await.unwrap());
    }
}
