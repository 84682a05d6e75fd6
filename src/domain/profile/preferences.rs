//! Derived preference groups stored alongside the trait scores.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::TimeOfDay;

pub const SESSION_MINUTES_RANGE: (u16, u16) = (5, 180);
pub const BREAK_MINUTES_RANGE: (u16, u16) = (1, 60);
pub const HYPERFOCUS_WARNING_RANGE: (u16, u16) = (15, 240);

fn clamp_range(value: u16, (min, max): (u16, u16)) -> u16 {
    value.clamp(min, max)
}

/// Focus timing preferences. All minute values stay within their ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FocusTimingRecord")]
pub struct FocusTiming {
    optimal_session_minutes: u16,
    break_minutes: u16,
    hyperfocus_warning_minutes: u16,
    preferred_time_of_day: Option<TimeOfDay>,
}

#[derive(Deserialize)]
struct FocusTimingRecord {
    #[serde(default = "default_session_minutes")]
    optimal_session_minutes: u16,
    #[serde(default = "default_break_minutes")]
    break_minutes: u16,
    #[serde(default = "default_hyperfocus_warning")]
    hyperfocus_warning_minutes: u16,
    #[serde(default)]
    preferred_time_of_day: Option<TimeOfDay>,
}

impl From<FocusTimingRecord> for FocusTiming {
    fn from(raw: FocusTimingRecord) -> Self {
        let mut timing = FocusTiming::default();
        timing.set_optimal_session_minutes(raw.optimal_session_minutes);
        timing.set_break_minutes(raw.break_minutes);
        timing.set_hyperfocus_warning_minutes(raw.hyperfocus_warning_minutes);
        timing.preferred_time_of_day = raw.preferred_time_of_day;
        timing
    }
}

fn default_session_minutes() -> u16 {
    25
}

fn default_break_minutes() -> u16 {
    5
}

fn default_hyperfocus_warning() -> u16 {
    90
}

impl FocusTiming {
    pub fn optimal_session_minutes(&self) -> u16 {
        self.optimal_session_minutes
    }

    pub fn break_minutes(&self) -> u16 {
        self.break_minutes
    }

    pub fn hyperfocus_warning_minutes(&self) -> u16 {
        self.hyperfocus_warning_minutes
    }

    pub fn preferred_time_of_day(&self) -> Option<TimeOfDay> {
        self.preferred_time_of_day
    }

    pub fn set_optimal_session_minutes(&mut self, minutes: u16) {
        self.optimal_session_minutes = clamp_range(minutes, SESSION_MINUTES_RANGE);
    }

    pub fn set_break_minutes(&mut self, minutes: u16) {
        self.break_minutes = clamp_range(minutes, BREAK_MINUTES_RANGE);
    }

    pub fn set_hyperfocus_warning_minutes(&mut self, minutes: u16) {
        self.hyperfocus_warning_minutes = clamp_range(minutes, HYPERFOCUS_WARNING_RANGE);
    }

    pub fn set_preferred_time_of_day(&mut self, time: TimeOfDay) {
        self.preferred_time_of_day = Some(time);
    }
}

impl Default for FocusTiming {
    fn default() -> Self {
        Self {
            optimal_session_minutes: default_session_minutes(),
            break_minutes: default_break_minutes(),
            hyperfocus_warning_minutes: default_hyperfocus_warning(),
            preferred_time_of_day: None,
        }
    }
}

/// Tolerance level for one sensory channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToleranceLevel {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensoryTolerances {
    #[serde(default)]
    pub sound: ToleranceLevel,
    #[serde(default)]
    pub light: ToleranceLevel,
    #[serde(default)]
    pub visual_density: ToleranceLevel,
}

/// Preferred channel for new material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningModality {
    #[default]
    Visual,
    Auditory,
    Kinesthetic,
    ReadingWriting,
}

/// How much material to present at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LearningStyle {
    #[serde(default)]
    pub modality: LearningModality,
    #[serde(default)]
    pub chunk_size: ChunkSize,
}

/// Which strategy list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyDomain {
    Focus,
    Emotional,
    Transitions,
    Sensory,
}

/// Personalized coping strategies. Insertion order is preference order;
/// duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupportStrategies {
    #[serde(default)]
    pub focus: Vec<String>,
    #[serde(default)]
    pub emotional: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<String>,
    #[serde(default)]
    pub sensory: Vec<String>,
}

impl SupportStrategies {
    pub fn list(&self, domain: StrategyDomain) -> &[String] {
        match domain {
            StrategyDomain::Focus => &self.focus,
            StrategyDomain::Emotional => &self.emotional,
            StrategyDomain::Transitions => &self.transitions,
            StrategyDomain::Sensory => &self.sensory,
        }
    }

    pub fn push(&mut self, domain: StrategyDomain, strategy: impl Into<String>) {
        let list = match domain {
            StrategyDomain::Focus => &mut self.focus,
            StrategyDomain::Emotional => &mut self.emotional,
            StrategyDomain::Transitions => &mut self.transitions,
            StrategyDomain::Sensory => &mut self.sensory,
        };
        list.push(strategy.into());
    }
}

/// Tool layout preferences driven by accepted recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolPreferences {
    #[serde(default)]
    pinned_tools: Vec<String>,
    #[serde(default)]
    context_defaults: BTreeMap<String, String>,
}

impl ToolPreferences {
    pub fn pinned_tools(&self) -> &[String] {
        &self.pinned_tools
    }

    pub fn context_defaults(&self) -> &BTreeMap<String, String> {
        &self.context_defaults
    }

    pub fn default_for(&self, activity: &str) -> Option<&str> {
        self.context_defaults.get(activity).map(String::as_str)
    }

    /// Pins a tool. Pinning an already pinned tool keeps its position.
    pub fn pin(&mut self, tool: &str) {
        if !self.pinned_tools.iter().any(|t| t == tool) {
            self.pinned_tools.push(tool.to_string());
        }
    }

    pub fn unpin(&mut self, tool: &str) {
        self.pinned_tools.retain(|t| t != tool);
    }

    pub fn set_context_default(&mut self, activity: impl Into<String>, tool: impl Into<String>) {
        self.context_defaults.insert(activity.into(), tool.into());
    }
}
