//! Behavioural scenarios the engine must satisfy, driven through the public
//! API.

use std::sync::Arc;

use serde_json::json;

use personalization_engine::adapters::{
    InMemoryEventLog, InMemoryInsightStore, InMemoryProfileStore, ManualClock,
};
use personalization_engine::application::{EnginePorts, PersonalizationSession, SessionSettings};
use personalization_engine::domain::assessment::{
    AssessmentAnswers, FocusStyle, OverwhelmResponse, RoutinePreference, TraitAggregator,
    TransitionDifficulty,
};
use personalization_engine::domain::foundation::{TimeOfDay, Timestamp, UserId};
use personalization_engine::domain::insights::{
    AnalysisKind, GrowthMetric, Insight, InsightPayload, InsightType, ToolAction,
};
use personalization_engine::domain::profile::{TraitKind, TraitScore};
use personalization_engine::domain::recommendations::{feedback_patch, recommend};
use personalization_engine::domain::signals::stats::{clamp_score, std_dev};
use personalization_engine::domain::signals::{
    GameKind, GameSession, IndicatorSet, PerformanceSample, SignalExtractor, SignalIndicators,
    NEUTRAL_SCORE,
};
use personalization_engine::domain::usage::ContextSnapshot;

const START: i64 = 1_700_000_000;

fn session_with_clock() -> (PersonalizationSession, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at(Timestamp::from_unix_secs(START)));
    let ports = EnginePorts {
        profile_store: Arc::new(InMemoryProfileStore::new()),
        event_log: Arc::new(InMemoryEventLog::new()),
        insight_store: Arc::new(InMemoryInsightStore::new()),
        clock: clock.clone(),
    };
    let session = PersonalizationSession::new(
        UserId::new("scenario").unwrap(),
        &ports,
        &SessionSettings::default(),
    );
    (session, clock)
}

const ALL_GAMES: [GameKind; 5] = [
    GameKind::SustainedAttention,
    GameKind::TaskSwitching,
    GameKind::DistractionFiltering,
    GameKind::SequenceMemory,
    GameKind::ReactionTime,
];

fn extreme_indicators(score: u8) -> IndicatorSet {
    ALL_GAMES
        .iter()
        .map(|game| SignalIndicators::scored(*game, score, 30))
        .collect()
}

fn answer_grid() -> Vec<AssessmentAnswers> {
    let mut grid = vec![AssessmentAnswers::default()];
    for focus in [FocusStyle::DeepDive, FocusStyle::ShortBursts, FocusStyle::Variable] {
        for transition in [
            TransitionDifficulty::Easy,
            TransitionDifficulty::Moderate,
            TransitionDifficulty::Hard,
        ] {
            for overwhelm in [
                OverwhelmResponse::Shutdown,
                OverwhelmResponse::Meltdown,
                OverwhelmResponse::Withdraw,
                OverwhelmResponse::PushThrough,
            ] {
                grid.push(AssessmentAnswers {
                    focus_style: Some(focus),
                    transition_difficulty: Some(transition),
                    overwhelm_response: Some(overwhelm),
                    routine_preference: Some(RoutinePreference::Strict),
                    ..AssessmentAnswers::default()
                });
            }
        }
    }
    grid
}

fn at(secs: i64) -> Timestamp {
    Timestamp::from_unix_secs(secs)
}

#[test]
fn traits_stay_in_bounds_after_aggregation_and_feedback() {
    let user = UserId::new("bounds").unwrap();
    let stress = Insight::new(
        InsightPayload::StressPatterns {
            events: 5,
            peak_time: TimeOfDay::Evening,
            trigger_activity: None,
        },
        0.9,
        5,
        14,
        at(START),
    );
    let growth = Insight::new(
        InsightPayload::PersonalGrowth {
            metric: GrowthMetric::CompletionRate,
            before: 0.4,
            after: 0.8,
        },
        0.9,
        10,
        30,
        at(START),
    );

    for answers in answer_grid() {
        for score in [0, 50, 100] {
            let mut profile =
                TraitAggregator::aggregate(user.clone(), &extreme_indicators(score), &answers, at(START));
            for _ in 0..15 {
                profile.apply_patch(&feedback_patch(&stress).unwrap());
                profile.apply_patch(&feedback_patch(&growth).unwrap());
                profile.apply_patch(&feedback_patch(&growth).unwrap());
            }
            for kind in TraitKind::ALL {
                assert!(profile.trait_score(kind).value() <= TraitScore::MAX);
            }
            assert_eq!(profile.trait_score(TraitKind::EmotionalRegulation).value(), 0);
            assert_eq!(profile.trait_score(TraitKind::ExecutiveFunction).value(), TraitScore::MAX);
        }
    }
}

#[test]
fn empty_sessions_give_the_neutral_default() {
    for game in ALL_GAMES {
        let indicators = SignalExtractor::extract(&GameSession::new(game, Vec::new()));
        assert_eq!(indicators.score, NEUTRAL_SCORE, "{}", game);
        assert!(indicators.fallback, "{}", game);
    }
}

#[test]
fn aggregation_is_deterministic() {
    let user = UserId::new("determinism").unwrap();
    let indicators = extreme_indicators(72);
    for answers in answer_grid() {
        let first = TraitAggregator::aggregate(user.clone(), &indicators, &answers, at(START));
        let second = TraitAggregator::aggregate(user.clone(), &indicators, &answers, at(START));
        assert_eq!(first, second);
    }
}

#[test]
fn sustained_attention_burst_is_one_lapse_with_high_variability_penalty() {
    let samples: Vec<PerformanceSample> = (0..50u64)
        .map(|i| {
            if (20..30).contains(&i) {
                PerformanceSample::new(i * 100, 90.0, false)
            } else {
                PerformanceSample::new(i * 100, 5.0, true)
            }
        })
        .collect();

    let indicators =
        SignalExtractor::extract(&GameSession::new(GameKind::SustainedAttention, samples.clone()));

    assert_eq!(indicators.lapse_count, Some(1));

    let distances: Vec<f64> = samples.iter().map(|s| s.distance).collect();
    let sd = std_dev(&distances).unwrap();
    assert!(sd > 30.0);
    let consistency = indicators.consistency.unwrap();
    assert!((consistency - (100.0 - 2.0 * sd)).abs() < 1e-9);

    let n = samples.len();
    let (hit, total) = samples.iter().enumerate().fold((0.0, 0.0), |(hit, total), (i, s)| {
        let w = 0.98f64.powi((n - 1 - i) as i32);
        (if s.in_target { hit + w } else { hit }, total + w)
    });
    let basic = 100.0 * hit / total;
    assert_eq!(indicators.score, clamp_score(basic - 15.0));
}

#[test]
fn task_switching_with_three_errors_and_620ms_cost_scores_65() {
    let tasks = [
        "color", "color", "color", "color", "color", "color", "shape", "shape", "shape", "shape",
        "color", "color", "color", "color", "color",
    ];
    let mut previous = "";
    let trials: Vec<PerformanceSample> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let switched = !previous.is_empty() && previous != *task;
            previous = *task;
            let rt = if switched { 1020.0 } else { 400.0 };
            PerformanceSample::new(i as u64 * 1000, rt, i >= 3).with_task_type(*task)
        })
        .collect();

    let indicators = SignalExtractor::extract(&GameSession::new(GameKind::TaskSwitching, trials));

    assert!((indicators.switch_cost_ms.unwrap() - 620.0).abs() < 1e-9);
    assert_eq!(indicators.score, 65);
}

#[test]
fn distraction_filtering_with_empty_baseline_is_neutral() {
    let samples: Vec<PerformanceSample> = (0..12u64)
        .map(|i| PerformanceSample::new(i * 500, 650.0, true).with_distractor(true))
        .collect();

    let indicators =
        SignalExtractor::extract(&GameSession::new(GameKind::DistractionFiltering, samples));

    assert_eq!(indicators.score, 50);
    assert!(indicators.fallback);
    assert_eq!(indicators.degradation_ratio, None);
}

async fn record_daily_uses(session: &PersonalizationSession, clock: &ManualClock, uses: usize) {
    record_daily_outcomes(session, clock, uses, true).await;
}

async fn record_daily_outcomes(session: &PersonalizationSession, clock: &ManualClock, uses: usize, effective: bool) {
    for _ in 0..uses {
        session
            .record_usage(
                "breathing",
                json!({"activity": "homework", "effective": effective}),
                ContextSnapshot::default(),
            )
            .await
            .unwrap();
        clock.advance_days(1);
    }
}

fn tool_insights(emitted: &[Insight]) -> Vec<&Insight> {
    emitted
        .iter()
        .filter(|i| i.insight_type() == InsightType::ToolEffectiveness)
        .collect()
}

#[tokio::test]
async fn nine_tool_uses_emit_no_tool_insight() {
    let (session, clock) = session_with_clock();
    record_daily_uses(&session, &clock, 9).await;

    let report = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    assert!(tool_insights(&report.emitted).is_empty());
}

#[tokio::test]
async fn ten_tool_uses_make_the_tool_eligible_for_promotion() {
    let (session, clock) = session_with_clock();
    record_daily_uses(&session, &clock, 10).await;

    let report = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    let found = tool_insights(&report.emitted);
    assert_eq!(found.len(), 1);
    assert!(matches!(
        found[0].payload(),
        InsightPayload::ToolEffectiveness { uses: 10, action: ToolAction::Promote, .. }
    ));

    let recommendation = recommend(found[0], 0.8).unwrap();
    assert_eq!(recommendation.insight_type, InsightType::ToolEffectiveness);
}

#[tokio::test]
async fn nine_poor_tool_uses_never_suggest_unpinning() {
    let (session, clock) = session_with_clock();
    record_daily_outcomes(&session, &clock, 9, false).await;

    let report = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    assert!(tool_insights(&report.emitted).is_empty());
    if let Some(pending) = session.get_pending_recommendation().await.unwrap() {
        assert_ne!(pending.insight_type, InsightType::ToolEffectiveness);
    }
}

#[tokio::test]
async fn ten_poor_tool_uses_suggest_unpinning() {
    let (session, clock) = session_with_clock();
    record_daily_outcomes(&session, &clock, 10, false).await;

    let report = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    let found = tool_insights(&report.emitted);
    assert_eq!(found.len(), 1);
    let patch = feedback_patch(found[0]).unwrap();
    assert_eq!(patch.unpin_tools, vec!["breathing".to_string()]);
}

#[tokio::test]
async fn unchanged_window_within_cooldown_emits_nothing_new() {
    let (session, clock) = session_with_clock();
    record_daily_uses(&session, &clock, 12).await;

    let first = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    assert!(first.emitted_count() > 0);

    let second = session.run_analysis_cycle(AnalysisKind::Behavioral).await.unwrap();
    assert_eq!(second.emitted_count(), 0);
}
