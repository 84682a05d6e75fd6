//! Profile patches: the single shape for every profile mutation.
//!
//! Assessment rule blocks and accepted insights both produce a `ProfilePatch`.
//! Patches only describe fields they want to change; `None` and empty
//! collections leave the profile untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::preferences::{ChunkSize, LearningModality, StrategyDomain, ToleranceLevel};
use super::traits::TraitKind;
use crate::domain::foundation::TimeOfDay;

/// How a patch changes one trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op", content = "value")]
pub enum TraitAdjustment {
    /// Overwrite with an absolute value (clamped to 0-10).
    Set(u8),
    /// Move relative to the current value (saturating).
    Shift(i8),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub traits: BTreeMap<TraitKind, TraitAdjustment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_session_minutes: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hyperfocus_warning_minutes: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time_of_day: Option<TimeOfDay>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_tolerance: Option<ToleranceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_tolerance: Option<ToleranceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_density_tolerance: Option<ToleranceLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_modality: Option<LearningModality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<ChunkSize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub append_strategies: Vec<(StrategyDomain, String)>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pin_tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpin_tools: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context_defaults: BTreeMap<String, String>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_trait(mut self, kind: TraitKind, value: u8) -> Self {
        self.traits.insert(kind, TraitAdjustment::Set(value));
        self
    }

    pub fn shift_trait(mut self, kind: TraitKind, delta: i8) -> Self {
        self.traits.insert(kind, TraitAdjustment::Shift(delta));
        self
    }

    pub fn strategy(mut self, domain: StrategyDomain, text: impl Into<String>) -> Self {
        self.append_strategies.push((domain, text.into()));
        self
    }

    /// True when applying this patch cannot change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_record_changes() {
        let patch = ProfilePatch::new()
            .set_trait(TraitKind::StructurePreference, 9)
            .shift_trait(TraitKind::EmotionalRegulation, -1)
            .strategy(StrategyDomain::Focus, "Use a visual timer");

        assert_eq!(
            patch.traits.get(&TraitKind::StructurePreference),
            Some(&TraitAdjustment::Set(9))
        );
        assert_eq!(
            patch.traits.get(&TraitKind::EmotionalRegulation),
            Some(&TraitAdjustment::Shift(-1))
        );
        assert_eq!(patch.append_strategies.len(), 1);
        assert!(!patch.is_empty());
    }

    #[test]
    fn later_builder_call_wins_for_same_trait() {
        let patch = ProfilePatch::new()
            .set_trait(TraitKind::SocialBattery, 2)
            .set_trait(TraitKind::SocialBattery, 8);
        assert_eq!(
            patch.traits.get(&TraitKind::SocialBattery),
            Some(&TraitAdjustment::Set(8))
        );
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = ProfilePatch::new();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }
}
