//! Questionnaire answers as categorical tags.
//!
//! Every question is optional; a skipped question simply leaves its rule
//! block without effect.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusStyle {
    DeepDive,
    ShortBursts,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyPattern {
    Morning,
    Afternoon,
    Evening,
    Night,
    Varies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorySensitivity {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutinePreference {
    Strict,
    Flexible,
    Spontaneous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDifficulty {
    Easy,
    Moderate,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningPreference {
    Visual,
    Auditory,
    HandsOn,
    Reading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialEnergy {
    DrainedQuickly,
    Balanced,
    Energized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwhelmResponse {
    Shutdown,
    Meltdown,
    Withdraw,
    PushThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskInitiation {
    Easy,
    Struggle,
}

/// Raw questionnaire answers from one assessment sitting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentAnswers {
    #[serde(default)]
    pub focus_style: Option<FocusStyle>,
    #[serde(default)]
    pub energy_pattern: Option<EnergyPattern>,
    #[serde(default)]
    pub sensory_sensitivity: Option<SensorySensitivity>,
    #[serde(default)]
    pub routine_preference: Option<RoutinePreference>,
    #[serde(default)]
    pub transition_difficulty: Option<TransitionDifficulty>,
    #[serde(default)]
    pub learning_preference: Option<LearningPreference>,
    #[serde(default)]
    pub social_energy: Option<SocialEnergy>,
    #[serde(default)]
    pub overwhelm_response: Option<OverwhelmResponse>,
    #[serde(default)]
    pub task_initiation: Option<TaskInitiation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_deserialize_from_snake_case_tags() {
        let json = r#"{"focus_style":"deep_dive","learning_preference":"hands_on","overwhelm_response":"push_through"}"#;
        let answers: AssessmentAnswers = serde_json::from_str(json).unwrap();
        assert_eq!(answers.focus_style, Some(FocusStyle::DeepDive));
        assert_eq!(answers.learning_preference, Some(LearningPreference::HandsOn));
        assert_eq!(answers.overwhelm_response, Some(OverwhelmResponse::PushThrough));
        assert_eq!(answers.energy_pattern, None);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let json = r#"{"focus_style":"laser"}"#;
        assert!(serde_json::from_str::<AssessmentAnswers>(json).is_err());
    }
}
