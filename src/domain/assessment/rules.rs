//! Ordered assessment rule blocks, ruleset version 1.
//!
//! Each block reads one answer or one indicator and returns the patch it
//! wants applied. Blocks overwrite trait values with `Set`, so when two
//! blocks touch the same trait the later block in `RULE_BLOCKS` wins.
//! Reordering blocks changes results and requires a ruleset version bump.

use super::answers::{
    AssessmentAnswers, EnergyPattern, FocusStyle, LearningPreference, OverwhelmResponse,
    RoutinePreference, SensorySensitivity, SocialEnergy, TaskInitiation, TransitionDifficulty,
};
use crate::domain::foundation::TimeOfDay;
use crate::domain::profile::{
    ChunkSize, LearningModality, ProfilePatch, StrategyDomain, ToleranceLevel, TraitKind,
};
use crate::domain::signals::{GameKind, IndicatorSet};

/// Version stamped on every profile produced by these rules.
pub const RULESET_VERSION: u32 = 1;

/// Everything a rule block may look at.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentInputs<'a> {
    pub answers: &'a AssessmentAnswers,
    pub indicators: &'a IndicatorSet,
}

/// One named, pure rule.
#[derive(Clone, Copy)]
pub struct RuleBlock {
    pub name: &'static str,
    pub apply: fn(&AssessmentInputs<'_>) -> Option<ProfilePatch>,
}

impl std::fmt::Debug for RuleBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleBlock").field("name", &self.name).finish()
    }
}

/// The fixed rule order. Later entries win on shared fields.
pub const RULE_BLOCKS: &[RuleBlock] = &[
    RuleBlock { name: "focus_style", apply: focus_style },
    RuleBlock { name: "energy_pattern", apply: energy_pattern },
    RuleBlock { name: "sensory_sensitivity", apply: sensory_sensitivity },
    RuleBlock { name: "routine_preference", apply: routine_preference },
    RuleBlock { name: "transition_difficulty", apply: transition_difficulty },
    RuleBlock { name: "learning_preference", apply: learning_preference },
    RuleBlock { name: "social_energy", apply: social_energy },
    RuleBlock { name: "overwhelm_response", apply: overwhelm_response },
    RuleBlock { name: "task_initiation", apply: task_initiation },
    RuleBlock { name: "sustained_attention", apply: sustained_attention },
    RuleBlock { name: "task_switching", apply: task_switching },
    RuleBlock { name: "distraction_filtering", apply: distraction_filtering },
    RuleBlock { name: "memory_and_reaction", apply: memory_and_reaction },
];

fn focus_style(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let (hyperfocus, flexibility, session, break_minutes, warning) = match inputs.answers.focus_style? {
        FocusStyle::DeepDive => (8, 3, 50, 10, 120),
        FocusStyle::ShortBursts => (3, 7, 15, 5, 45),
        FocusStyle::Variable => (5, 6, 25, 5, 90),
    };
    Some(ProfilePatch {
        optimal_session_minutes: Some(session),
        break_minutes: Some(break_minutes),
        hyperfocus_warning_minutes: Some(warning),
        ..ProfilePatch::new()
            .set_trait(TraitKind::HyperfocusIntensity, hyperfocus)
            .set_trait(TraitKind::AttentionFlexibility, flexibility)
    })
}

fn energy_pattern(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let time = match inputs.answers.energy_pattern? {
        EnergyPattern::Morning => TimeOfDay::Morning,
        EnergyPattern::Afternoon => TimeOfDay::Afternoon,
        EnergyPattern::Evening => TimeOfDay::Evening,
        EnergyPattern::Night => TimeOfDay::Night,
        EnergyPattern::Varies => {
            return Some(ProfilePatch::new().set_trait(TraitKind::ChangeAdaptability, 6));
        }
    };
    Some(ProfilePatch {
        preferred_time_of_day: Some(time),
        ..ProfilePatch::default()
    })
}

fn sensory_sensitivity(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let patch = match inputs.answers.sensory_sensitivity? {
        SensorySensitivity::High => ProfilePatch {
            sound_tolerance: Some(ToleranceLevel::Low),
            light_tolerance: Some(ToleranceLevel::Low),
            visual_density_tolerance: Some(ToleranceLevel::Low),
            ..ProfilePatch::new()
                .set_trait(TraitKind::SensoryProcessing, 8)
                .strategy(StrategyDomain::Sensory, "Keep noise-cancelling headphones within reach")
        },
        SensorySensitivity::Moderate => ProfilePatch {
            sound_tolerance: Some(ToleranceLevel::Medium),
            light_tolerance: Some(ToleranceLevel::Medium),
            visual_density_tolerance: Some(ToleranceLevel::Medium),
            ..ProfilePatch::new().set_trait(TraitKind::SensoryProcessing, 5)
        },
        SensorySensitivity::Low => ProfilePatch {
            sound_tolerance: Some(ToleranceLevel::High),
            light_tolerance: Some(ToleranceLevel::High),
            visual_density_tolerance: Some(ToleranceLevel::High),
            ..ProfilePatch::new().set_trait(TraitKind::SensoryProcessing, 3)
        },
    };
    Some(patch)
}

fn routine_preference(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let patch = match inputs.answers.routine_preference? {
        RoutinePreference::Strict => ProfilePatch::new()
            .set_trait(TraitKind::StructurePreference, 9)
            .set_trait(TraitKind::ChangeAdaptability, 3),
        RoutinePreference::Flexible => ProfilePatch::new()
            .set_trait(TraitKind::StructurePreference, 5)
            .set_trait(TraitKind::ChangeAdaptability, 6),
        RoutinePreference::Spontaneous => ProfilePatch::new()
            .set_trait(TraitKind::StructurePreference, 2)
            .set_trait(TraitKind::ChangeAdaptability, 8)
            .set_trait(TraitKind::CreativityExpression, 7),
    };
    Some(patch)
}

fn transition_difficulty(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let patch = match inputs.answers.transition_difficulty? {
        TransitionDifficulty::Hard => ProfilePatch::new()
            .set_trait(TraitKind::ChangeAdaptability, 2)
            .set_trait(TraitKind::StructurePreference, 8)
            .strategy(StrategyDomain::Transitions, "Get a five minute warning before switching tasks"),
        TransitionDifficulty::Moderate => {
            ProfilePatch::new().set_trait(TraitKind::ChangeAdaptability, 5)
        }
        TransitionDifficulty::Easy => ProfilePatch::new().set_trait(TraitKind::ChangeAdaptability, 7),
    };
    Some(patch)
}

fn learning_preference(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let (modality, chunk) = match inputs.answers.learning_preference? {
        LearningPreference::Visual => (LearningModality::Visual, None),
        LearningPreference::Auditory => (LearningModality::Auditory, None),
        LearningPreference::HandsOn => (LearningModality::Kinesthetic, Some(ChunkSize::Small)),
        LearningPreference::Reading => (LearningModality::ReadingWriting, Some(ChunkSize::Large)),
    };
    Some(ProfilePatch {
        learning_modality: Some(modality),
        chunk_size: chunk,
        ..ProfilePatch::default()
    })
}

fn social_energy(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let battery = match inputs.answers.social_energy? {
        SocialEnergy::DrainedQuickly => 2,
        SocialEnergy::Balanced => 5,
        SocialEnergy::Energized => 8,
    };
    Some(ProfilePatch::new().set_trait(TraitKind::SocialBattery, battery))
}

fn overwhelm_response(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let patch = match inputs.answers.overwhelm_response? {
        OverwhelmResponse::Shutdown => ProfilePatch::new()
            .set_trait(TraitKind::EmotionalRegulation, 3)
            .strategy(StrategyDomain::Emotional, "Step away to a quiet space and reset with slow breathing"),
        OverwhelmResponse::Meltdown => ProfilePatch::new()
            .set_trait(TraitKind::EmotionalRegulation, 2)
            .strategy(StrategyDomain::Emotional, "Use the escape hatch early, before overwhelm peaks"),
        OverwhelmResponse::Withdraw => {
            ProfilePatch::new().set_trait(TraitKind::EmotionalRegulation, 4)
        }
        OverwhelmResponse::PushThrough => {
            ProfilePatch::new().set_trait(TraitKind::EmotionalRegulation, 6)
        }
    };
    Some(patch)
}

fn task_initiation(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let patch = match inputs.answers.task_initiation? {
        TaskInitiation::Struggle => ProfilePatch::new()
            .set_trait(TraitKind::ExecutiveFunction, 3)
            .strategy(StrategyDomain::Focus, "Shrink the first step to something that takes two minutes"),
        TaskInitiation::Easy => ProfilePatch::new().set_trait(TraitKind::ExecutiveFunction, 7),
    };
    Some(patch)
}

fn sustained_attention(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let indicators = inputs.indicators.measured(GameKind::SustainedAttention)?;
    if indicators.score >= 80 {
        Some(ProfilePatch::new().set_trait(TraitKind::HyperfocusIntensity, 8))
    } else if indicators.score < 40 || indicators.lapse_count.unwrap_or(0) >= 3 {
        Some(
            ProfilePatch::new()
                .set_trait(TraitKind::HyperfocusIntensity, 3)
                .set_trait(TraitKind::AttentionFlexibility, 7),
        )
    } else {
        None
    }
}

fn task_switching(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let indicators = inputs.indicators.measured(GameKind::TaskSwitching)?;
    let costly = indicators.switch_cost_ms.is_some_and(|c| c > 500.0);
    if costly || indicators.score < 50 {
        Some(
            ProfilePatch::new()
                .set_trait(TraitKind::ChangeAdaptability, 3)
                .set_trait(TraitKind::AttentionFlexibility, 3),
        )
    } else if indicators.score >= 80 {
        Some(
            ProfilePatch::new()
                .set_trait(TraitKind::ChangeAdaptability, 8)
                .set_trait(TraitKind::AttentionFlexibility, 8),
        )
    } else {
        None
    }
}

fn distraction_filtering(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let indicators = inputs.indicators.measured(GameKind::DistractionFiltering)?;
    if indicators.score < 50 {
        Some(ProfilePatch {
            visual_density_tolerance: Some(ToleranceLevel::Low),
            ..ProfilePatch::new().set_trait(TraitKind::SensoryProcessing, 8)
        })
    } else if indicators.score >= 80 {
        Some(ProfilePatch::new().set_trait(TraitKind::SensoryProcessing, 3))
    } else {
        None
    }
}

fn memory_and_reaction(inputs: &AssessmentInputs<'_>) -> Option<ProfilePatch> {
    let scores: Vec<u32> = [GameKind::SequenceMemory, GameKind::ReactionTime]
        .into_iter()
        .filter_map(|game| inputs.indicators.measured(game))
        .map(|i| u32::from(i.score))
        .collect();
    if scores.is_empty() {
        return None;
    }
    let average = scores.iter().sum::<u32>() / scores.len() as u32;
    if average >= 70 {
        Some(ProfilePatch::new().set_trait(TraitKind::InformationProcessing, 8))
    } else if average < 40 {
        Some(ProfilePatch {
            chunk_size: Some(ChunkSize::Small),
            ..ProfilePatch::new().set_trait(TraitKind::InformationProcessing, 3)
        })
    } else {
        None
    }
}
