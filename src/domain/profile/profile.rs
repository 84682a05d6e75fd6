//! Profile aggregate root and core value objects

use serde::{Deserialize, Serialize};

use super::patch::{ProfilePatch, TraitAdjustment};
use super::preferences::{
    FocusTiming, LearningStyle, SensoryTolerances, SupportStrategies, ToolPreferences,
};
use super::traits::{TraitKind, TraitScore, TraitScores};
use crate::domain::foundation::{Timestamp, UserId};

/// Current persisted layout of `Profile`.
pub const PROFILE_SCHEMA_VERSION: u16 = 1;

/// Profile version for optimistic concurrency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileVersion(u32);

impl ProfileVersion {
    /// Create initial version (1)
    pub fn initial() -> Self {
        Self(1)
    }

    /// Create from value
    pub fn from_u32(value: u32) -> Result<Self, &'static str> {
        if value == 0 {
            Err("Profile version must be greater than 0")
        } else {
            Ok(Self(value))
        }
    }

    /// Increment version
    pub fn increment(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Get inner value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for ProfileVersion {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Profile aggregate root
///
/// The durable behavioral model for one learner. Created with neutral defaults
/// on first access, mutated through `apply_patch` or `adopt_assessment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    // Identity
    user_id: UserId,
    schema_version: u16,
    version: ProfileVersion,
    #[serde(default)]
    ruleset_version: Option<u32>,

    // Traits and derived preferences
    #[serde(default)]
    traits: TraitScores,
    #[serde(default)]
    focus_timing: FocusTiming,
    #[serde(default)]
    sensory: SensoryTolerances,
    #[serde(default)]
    learning_style: LearningStyle,
    #[serde(default)]
    strategies: SupportStrategies,
    #[serde(default)]
    tools: ToolPreferences,

    // Metadata
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Profile {
    /// Create a profile with every trait at the neutral default.
    pub fn new(user_id: UserId, timestamp: Timestamp) -> Self {
        Self {
            user_id,
            schema_version: PROFILE_SCHEMA_VERSION,
            version: ProfileVersion::initial(),
            ruleset_version: None,
            traits: TraitScores::default(),
            focus_timing: FocusTiming::default(),
            sensory: SensoryTolerances::default(),
            learning_style: LearningStyle::default(),
            strategies: SupportStrategies::default(),
            tools: ToolPreferences::default(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    // Getters
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn schema_version(&self) -> u16 {
        self.schema_version
    }

    pub fn version(&self) -> ProfileVersion {
        self.version
    }

    pub fn ruleset_version(&self) -> Option<u32> {
        self.ruleset_version
    }

    pub fn traits(&self) -> &TraitScores {
        &self.traits
    }

    pub fn trait_score(&self, kind: TraitKind) -> TraitScore {
        self.traits.get(kind)
    }

    pub fn focus_timing(&self) -> &FocusTiming {
        &self.focus_timing
    }

    pub fn sensory(&self) -> &SensoryTolerances {
        &self.sensory
    }

    pub fn learning_style(&self) -> &LearningStyle {
        &self.learning_style
    }

    pub fn strategies(&self) -> &SupportStrategies {
        &self.strategies
    }

    pub fn tools(&self) -> &ToolPreferences {
        &self.tools
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Merge a patch into the profile.
    ///
    /// Fields the patch leaves unset are never touched. Trait adjustments
    /// saturate at the 0-10 bounds and minute values clamp to their ranges.
    pub fn apply_patch(&mut self, patch: &ProfilePatch) {
        for (kind, adjustment) in &patch.traits {
            let current = self.traits.get(*kind);
            let next = match adjustment {
                TraitAdjustment::Set(value) => TraitScore::new(*value),
                TraitAdjustment::Shift(delta) => current.shifted(*delta),
            };
            self.traits.set(*kind, next);
        }

        if let Some(minutes) = patch.optimal_session_minutes {
            self.focus_timing.set_optimal_session_minutes(minutes);
        }
        if let Some(minutes) = patch.break_minutes {
            self.focus_timing.set_break_minutes(minutes);
        }
        if let Some(minutes) = patch.hyperfocus_warning_minutes {
            self.focus_timing.set_hyperfocus_warning_minutes(minutes);
        }
        if let Some(time) = patch.preferred_time_of_day {
            self.focus_timing.set_preferred_time_of_day(time);
        }

        if let Some(level) = patch.sound_tolerance {
            self.sensory.sound = level;
        }
        if let Some(level) = patch.light_tolerance {
            self.sensory.light = level;
        }
        if let Some(level) = patch.visual_density_tolerance {
            self.sensory.visual_density = level;
        }

        if let Some(modality) = patch.learning_modality {
            self.learning_style.modality = modality;
        }
        if let Some(chunk) = patch.chunk_size {
            self.learning_style.chunk_size = chunk;
        }

        for (domain, text) in &patch.append_strategies {
            self.strategies.push(*domain, text.clone());
        }

        for tool in &patch.pin_tools {
            self.tools.pin(tool);
        }
        for tool in &patch.unpin_tools {
            self.tools.unpin(tool);
        }
        for (activity, tool) in &patch.context_defaults {
            self.tools.set_context_default(activity.clone(), tool.clone());
        }
    }

    /// Take over the assessed traits and preferences of a freshly aggregated
    /// profile while keeping identity, version history and tool preferences.
    pub fn adopt_assessment(&mut self, assessed: &Profile) {
        self.traits = assessed.traits.clone();
        self.focus_timing = assessed.focus_timing.clone();
        self.sensory = assessed.sensory.clone();
        self.learning_style = assessed.learning_style.clone();
        self.strategies = assessed.strategies.clone();
        self.ruleset_version = assessed.ruleset_version;
    }

    pub(crate) fn set_ruleset_version(&mut self, version: u32) {
        self.ruleset_version = Some(version);
    }

    /// Stamp a committed mutation: bump the version and the update time.
    pub fn touch(&mut self, timestamp: Timestamp) {
        self.version = self.version.increment();
        self.updated_at = timestamp;
    }
}
