//! Support-strategy generator. Runs after every rule block on final traits.

use crate::domain::profile::{ProfilePatch, StrategyDomain, TraitKind, TraitScores};

const HIGH: u8 = 8;
const LOW: u8 = 3;

/// Strategies appended for the finalized trait values, in a fixed order.
pub fn support_strategies(traits: &TraitScores) -> ProfilePatch {
    let high = |kind: TraitKind| traits.get(kind).value() >= HIGH;
    let low = |kind: TraitKind| traits.get(kind).value() <= LOW;

    let mut patch = ProfilePatch::new();

    if high(TraitKind::HyperfocusIntensity) {
        patch = patch
            .strategy(StrategyDomain::Focus, "Set a check-in alarm before starting deep work")
            .strategy(StrategyDomain::Focus, "Plan a hard stop and a wind-down task after long sessions");
    }
    if low(TraitKind::AttentionFlexibility) {
        patch = patch.strategy(StrategyDomain::Transitions, "Batch similar tasks to reduce context switches");
    }
    if high(TraitKind::SensoryProcessing) {
        patch = patch.strategy(StrategyDomain::Sensory, "Work in a low-stimulation space with minimal visual clutter");
    }
    if low(TraitKind::ExecutiveFunction) {
        patch = patch.strategy(StrategyDomain::Focus, "Keep a visible checklist for multi-step tasks");
    }
    if low(TraitKind::EmotionalRegulation) {
        patch = patch.strategy(StrategyDomain::Emotional, "Keep a calm-down routine ready for overwhelming moments");
    }
    if low(TraitKind::SocialBattery) {
        patch = patch.strategy(StrategyDomain::Emotional, "Schedule quiet recovery time after group activities");
    }
    if high(TraitKind::StructurePreference) {
        patch = patch.strategy(StrategyDomain::Transitions, "Follow a posted daily routine");
    }

    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::TraitScore;

    #[test]
    fn neutral_traits_need_no_strategies() {
        assert!(support_strategies(&TraitScores::default()).is_empty());
    }

    #[test]
    fn high_hyperfocus_adds_a_focus_pair() {
        let mut traits = TraitScores::default();
        traits.set(TraitKind::HyperfocusIntensity, TraitScore::new(9));
        let patch = support_strategies(&traits);
        let focus: Vec<_> = patch
            .append_strategies
            .iter()
            .filter(|(d, _)| *d == StrategyDomain::Focus)
            .collect();
        assert_eq!(focus.len(), 2);
    }

    #[test]
    fn low_emotional_regulation_and_social_battery_both_append() {
        let mut traits = TraitScores::default();
        traits.set(TraitKind::EmotionalRegulation, TraitScore::new(2));
        traits.set(TraitKind::SocialBattery, TraitScore::new(1));
        let patch = support_strategies(&traits);
        assert_eq!(patch.append_strategies.len(), 2);
        assert!(patch
            .append_strategies
            .iter()
            .all(|(d, _)| *d == StrategyDomain::Emotional));
    }
}
