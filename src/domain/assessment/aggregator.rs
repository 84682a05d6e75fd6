//! Trait Aggregator - folds rule-block patches into a complete profile.

use tracing::debug;

use super::answers::AssessmentAnswers;
use super::rules::{AssessmentInputs, RULESET_VERSION, RULE_BLOCKS};
use super::strategies::support_strategies;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::profile::{Profile, ProfilePatch};
use crate::domain::signals::IndicatorSet;

/// Stateless aggregator. Output depends only on its arguments.
pub struct TraitAggregator;

impl TraitAggregator {
    /// Builds a fully initialized profile from one assessment sitting.
    ///
    /// Starts from the neutral profile, applies every rule block in order
    /// (later blocks overwrite earlier ones on shared fields), then appends
    /// support strategies derived from the final trait values.
    pub fn aggregate(
        user_id: UserId,
        indicators: &IndicatorSet,
        answers: &AssessmentAnswers,
        assessed_at: Timestamp,
    ) -> Profile {
        let mut profile = Profile::new(user_id, assessed_at);

        for (name, patch) in Self::rule_patches(indicators, answers) {
            debug!(rule = name, traits = patch.traits.len(), "Applying assessment rule");
            profile.apply_patch(&patch);
        }

        let strategies = support_strategies(profile.traits());
        profile.apply_patch(&strategies);
        profile.set_ruleset_version(RULESET_VERSION);
        profile
    }

    /// The patches each rule block produced, in application order.
    pub fn rule_patches(
        indicators: &IndicatorSet,
        answers: &AssessmentAnswers,
    ) -> Vec<(&'static str, ProfilePatch)> {
        let inputs = AssessmentInputs { answers, indicators };
        RULE_BLOCKS
            .iter()
            .filter_map(|block| (block.apply)(&inputs).map(|patch| (block.name, patch)))
            .collect()
    }
}
