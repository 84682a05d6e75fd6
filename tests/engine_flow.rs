//! End-to-end flows through `PersonalizationEngine` over in-memory adapters.

use std::sync::Arc;

use serde_json::json;

use personalization_engine::adapters::{
    InMemoryEventLog, InMemoryInsightStore, InMemoryProfileStore, ManualClock,
};
use personalization_engine::application::{EnginePorts, PersonalizationEngine, SessionSettings};
use personalization_engine::domain::assessment::{
    AssessmentAnswers, FocusStyle, OverwhelmResponse, TransitionDifficulty,
};
use personalization_engine::domain::foundation::{ErrorCode, InsightId, Timestamp, UserId};
use personalization_engine::domain::insights::{AnalysisKind, InsightPayload, InsightType, ToolAction};
use personalization_engine::domain::profile::{StrategyDomain, TraitKind};
use personalization_engine::domain::signals::{GameKind, GameSession, IndicatorSet, PerformanceSample};
use personalization_engine::domain::usage::ContextSnapshot;
use personalization_engine::ports::{InsightStore, ProfileStore};

const START: i64 = 1_700_000_000;

struct Harness {
    clock: Arc<ManualClock>,
    profiles: Arc<InMemoryProfileStore>,
    insights: Arc<InMemoryInsightStore>,
    engine: PersonalizationEngine,
}

fn harness() -> Harness {
    let clock = Arc::new(ManualClock::at(Timestamp::from_unix_secs(START)));
    let profiles = Arc::new(InMemoryProfileStore::new());
    let insights = Arc::new(InMemoryInsightStore::new());
    let ports = EnginePorts {
        profile_store: profiles.clone(),
        event_log: Arc::new(InMemoryEventLog::new()),
        insight_store: insights.clone(),
        clock: clock.clone(),
    };
    Harness {
        clock,
        profiles,
        insights,
        engine: PersonalizationEngine::new(ports, SessionSettings::default()),
    }
}

fn learner() -> UserId {
    UserId::new("learner-42").unwrap()
}

fn answers() -> AssessmentAnswers {
    AssessmentAnswers {
        focus_style: Some(FocusStyle::DeepDive),
        transition_difficulty: Some(TransitionDifficulty::Hard),
        overwhelm_response: Some(OverwhelmResponse::Shutdown),
        ..AssessmentAnswers::default()
    }
}

/// One effective use of `tool` per day for `days` days, then the clock
/// moves one more day.
async fn daily_uses(h: &Harness, tool: &str, days: usize) {
    let session = h.engine.session(&learner()).await;
    for _ in 0..days {
        session
            .record_usage(
                tool,
                json!({"activity": "homework", "effective": true}),
                ContextSnapshot::default(),
            )
            .await
            .unwrap();
        h.clock.advance_days(1);
    }
}

async fn tool_insight_id(h: &Harness, tool: &str) -> InsightId {
    let session = h.engine.session(&learner()).await;
    let report = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    report
        .emitted
        .iter()
        .find(|i| matches!(
            i.payload(),
            InsightPayload::ToolEffectiveness { tool_id, action: ToolAction::Promote, .. } if tool_id == tool
        ))
        .map(|i| i.id())
        .expect("promote insight emitted")
}

#[tokio::test]
async fn games_then_assessment_builds_a_versioned_profile() {
    let h = harness();
    let session = h.engine.session(&learner()).await;

    let samples = (0..30).map(|i| PerformanceSample::new(i * 100, 5.0, true)).collect();
    let attention = session
        .submit_game_session(GameSession::new(GameKind::SustainedAttention, samples))
        .await;
    assert_eq!(attention.score, 100);

    let indicators = session.collected_indicators().await;
    let profile = session.submit_assessment(answers(), indicators).await.unwrap();

    assert_eq!(profile.ruleset_version(), Some(1));
    let stored = h.profiles.load_profile(&learner()).await.unwrap().unwrap();
    assert_eq!(stored.traits(), profile.traits());
    assert_eq!(stored.version(), profile.version());
}

#[tokio::test]
async fn accepted_recommendation_is_merged_into_the_stored_profile() {
    let h = harness();
    daily_uses(&h, "breathing", 12).await;
    let id = tool_insight_id(&h, "breathing").await;

    let session = h.engine.session(&learner()).await;
    let result = session.resolve_recommendation(id, true).await.unwrap();
    assert!(result.newly_resolved);

    let reloaded = h.profiles.load_profile(&learner()).await.unwrap().unwrap();
    assert!(reloaded.tools().pinned_tools().contains(&"breathing".to_string()));

    let log = h.insights.load_log(&learner()).await.unwrap();
    assert!(log.get(id).unwrap().is_actioned());
}

#[tokio::test]
async fn rejected_recommendation_only_marks_the_insight() {
    let h = harness();
    let session = h.engine.session(&learner()).await;
    session
        .submit_assessment(answers(), IndicatorSet::new())
        .await
        .unwrap();
    let before = h.profiles.load_profile(&learner()).await.unwrap().unwrap();

    daily_uses(&h, "breathing", 12).await;
    let id = tool_insight_id(&h, "breathing").await;
    let result = session.resolve_recommendation(id, false).await.unwrap();

    assert!(result.newly_resolved);
    assert!(result.profile.is_none());

    let after = h.profiles.load_profile(&learner()).await.unwrap().unwrap();
    assert_eq!(after.traits(), before.traits());
    assert_eq!(after.version(), before.version());
    assert!(after.tools().pinned_tools().is_empty());

    let log = h.insights.load_log(&learner()).await.unwrap();
    assert!(log.get(id).unwrap().is_actioned());
}

#[tokio::test]
async fn pending_recommendation_goes_quiet_after_a_resolution() {
    let h = harness();
    daily_uses(&h, "breathing", 12).await;

    let session = h.engine.session(&learner()).await;
    session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();

    let first = session.get_pending_recommendation().await.unwrap().expect("something to show");
    session.resolve_recommendation(first.insight_id, false).await.unwrap();
    assert!(session.get_pending_recommendation().await.unwrap().is_none());

    h.clock.advance_minutes(61);
    if let Some(next) = session.get_pending_recommendation().await.unwrap() {
        assert_ne!(next.insight_id, first.insight_id);
    }
}

#[tokio::test]
async fn resolving_twice_is_a_no_op_and_unknown_ids_fail() {
    let h = harness();
    daily_uses(&h, "breathing", 12).await;
    let id = tool_insight_id(&h, "breathing").await;
    let session = h.engine.session(&learner()).await;

    assert!(session.resolve_recommendation(id, true).await.unwrap().newly_resolved);
    let version = h.profiles.load_profile(&learner()).await.unwrap().unwrap().version();

    let again = session.resolve_recommendation(id, true).await.unwrap();
    assert!(!again.newly_resolved);
    let unchanged = h.profiles.load_profile(&learner()).await.unwrap().unwrap();
    assert_eq!(unchanged.version(), version);

    let err = session
        .resolve_recommendation(InsightId::new(), true)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InsightNotFound);
}

#[tokio::test]
async fn rerunning_a_cycle_within_cooldown_emits_nothing() {
    let h = harness();
    daily_uses(&h, "breathing", 12).await;
    let session = h.engine.session(&learner()).await;

    let first = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    assert!(first
        .emitted
        .iter()
        .any(|i| i.insight_type() == InsightType::ToolEffectiveness));

    h.clock.advance_minutes(60);
    let second = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    assert_eq!(second.emitted_count(), 0);

    let log = h.insights.load_log(&learner()).await.unwrap();
    assert_eq!(log.len(), first.emitted_count());
}

/// Twelve escape-hatch presses while reading, one per day.
async fn daily_escapes(h: &Harness) {
    let session = h.engine.session(&learner()).await;
    for _ in 0..12 {
        session
            .record_usage("escape_hatch", json!({"activity": "reading"}), ContextSnapshot::default())
            .await
            .unwrap();
        h.clock.advance_days(1);
    }
}

/// Resolves every pending recommendation in turn and returns their types.
async fn resolve_all_pending(h: &Harness, accepted: bool) -> Vec<InsightType> {
    let session = h.engine.session(&learner()).await;
    let mut resolved = Vec::new();
    while let Some(pending) = session.get_pending_recommendation().await.unwrap() {
        session.resolve_recommendation(pending.insight_id, accepted).await.unwrap();
        resolved.push(pending.insight_type);
        h.clock.advance_minutes(61);
    }
    resolved
}

async fn stress_stays_resolved(accepted: bool) {
    let h = harness();
    let session = h.engine.session(&learner()).await;
    session
        .submit_assessment(answers(), IndicatorSet::new())
        .await
        .unwrap();
    daily_escapes(&h).await;

    session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    let resolved = resolve_all_pending(&h, accepted).await;
    assert!(resolved.contains(&InsightType::StressPatterns));

    let settled = h.profiles.load_profile(&learner()).await.unwrap().unwrap();
    for _ in 0..4 {
        h.clock.advance_days(1);
        let report = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
        assert!(report
            .emitted
            .iter()
            .all(|i| i.insight_type() != InsightType::StressPatterns));
        assert!(session.get_pending_recommendation().await.unwrap().is_none());
    }

    let after = h.profiles.load_profile(&learner()).await.unwrap().unwrap();
    assert_eq!(after.version(), settled.version());
    assert_eq!(
        after.traits().get(TraitKind::EmotionalRegulation),
        settled.traits().get(TraitKind::EmotionalRegulation)
    );
    assert_eq!(
        after.strategies().list(StrategyDomain::Emotional).len(),
        settled.strategies().list(StrategyDomain::Emotional).len()
    );
}

#[tokio::test]
async fn rejected_finding_does_not_return_after_the_cooldown() {
    stress_stays_resolved(false).await;
}

#[tokio::test]
async fn accepted_finding_is_applied_once() {
    stress_stays_resolved(true).await;
}
