//! The ten bounded behavioral trait dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Named trait dimension of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    HyperfocusIntensity,
    AttentionFlexibility,
    SensoryProcessing,
    ExecutiveFunction,
    EmotionalRegulation,
    ChangeAdaptability,
    SocialBattery,
    InformationProcessing,
    CreativityExpression,
    StructurePreference,
}

impl TraitKind {
    pub const ALL: [TraitKind; 10] = [
        TraitKind::HyperfocusIntensity,
        TraitKind::AttentionFlexibility,
        TraitKind::SensoryProcessing,
        TraitKind::ExecutiveFunction,
        TraitKind::EmotionalRegulation,
        TraitKind::ChangeAdaptability,
        TraitKind::SocialBattery,
        TraitKind::InformationProcessing,
        TraitKind::CreativityExpression,
        TraitKind::StructurePreference,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TraitKind::HyperfocusIntensity => "hyperfocus_intensity",
            TraitKind::AttentionFlexibility => "attention_flexibility",
            TraitKind::SensoryProcessing => "sensory_processing",
            TraitKind::ExecutiveFunction => "executive_function",
            TraitKind::EmotionalRegulation => "emotional_regulation",
            TraitKind::ChangeAdaptability => "change_adaptability",
            TraitKind::SocialBattery => "social_battery",
            TraitKind::InformationProcessing => "information_processing",
            TraitKind::CreativityExpression => "creativity_expression",
            TraitKind::StructurePreference => "structure_preference",
        }
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A trait value on the 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TraitScore(u8);

impl TraitScore {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;
    pub const NEUTRAL: Self = Self(5);

    /// Creates a score, clamping to the valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    /// Creates a score, returning error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > Self::MAX {
            return Err(ValidationError::out_of_range(
                "trait_score",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns a new score moved by `delta`, saturating at the bounds.
    pub fn shifted(&self, delta: i8) -> Self {
        let moved = (self.0 as i16 + delta as i16).clamp(Self::MIN as i16, Self::MAX as i16);
        Self(moved as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for TraitScore {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<u8> for TraitScore {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<TraitScore> for u8 {
    fn from(score: TraitScore) -> Self {
        score.0
    }
}

impl fmt::Display for TraitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// All ten trait scores of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraitScores {
    #[serde(default)]
    pub hyperfocus_intensity: TraitScore,
    #[serde(default)]
    pub attention_flexibility: TraitScore,
    #[serde(default)]
    pub sensory_processing: TraitScore,
    #[serde(default)]
    pub executive_function: TraitScore,
    #[serde(default)]
    pub emotional_regulation: TraitScore,
    #[serde(default)]
    pub change_adaptability: TraitScore,
    #[serde(default)]
    pub social_battery: TraitScore,
    #[serde(default)]
    pub information_processing: TraitScore,
    #[serde(default)]
    pub creativity_expression: TraitScore,
    #[serde(default)]
    pub structure_preference: TraitScore,
}

impl TraitScores {
    pub fn get(&self, kind: TraitKind) -> TraitScore {
        match kind {
            TraitKind::HyperfocusIntensity => self.hyperfocus_intensity,
            TraitKind::AttentionFlexibility => self.attention_flexibility,
            TraitKind::SensoryProcessing => self.sensory_processing,
            TraitKind::ExecutiveFunction => self.executive_function,
            TraitKind::EmotionalRegulation => self.emotional_regulation,
            TraitKind::ChangeAdaptability => self.change_adaptability,
            TraitKind::SocialBattery => self.social_battery,
            TraitKind::InformationProcessing => self.information_processing,
            TraitKind::CreativityExpression => self.creativity_expression,
            TraitKind::StructurePreference => self.structure_preference,
        }
    }

    pub fn set(&mut self, kind: TraitKind, score: TraitScore) {
        let slot = match kind {
            TraitKind::HyperfocusIntensity => &mut self.hyperfocus_intensity,
            TraitKind::AttentionFlexibility => &mut self.attention_flexibility,
            TraitKind::SensoryProcessing => &mut self.sensory_processing,
            TraitKind::ExecutiveFunction => &mut self.executive_function,
            TraitKind::EmotionalRegulation => &mut self.emotional_regulation,
            TraitKind::ChangeAdaptability => &mut self.change_adaptability,
            TraitKind::SocialBattery => &mut self.social_battery,
            TraitKind::InformationProcessing => &mut self.information_processing,
            TraitKind::CreativityExpression => &mut self.creativity_expression,
            TraitKind::StructurePreference => &mut self.structure_preference,
        };
        *slot = score;
    }

    /// Iterates all traits in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitKind, TraitScore)> + '_ {
        TraitKind::ALL.iter().map(move |kind| (*kind, self.get(*kind)))
    }
}
