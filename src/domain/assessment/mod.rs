//! Assessment module - turns one assessment sitting into a profile.
//!
//! # Components
//!
//! - `AssessmentAnswers` - categorical questionnaire answers
//! - `RULE_BLOCKS` - ordered pure rules, each producing a `ProfilePatch`
//! - `support_strategies` - appends strategies from final trait values
//! - `TraitAggregator` - deterministic fold of the above
//!
//! # Conflict policy
//!
//! Rule blocks overwrite. When two blocks set the same trait, the block that
//! comes later in `RULE_BLOCKS` wins. The order is versioned by
//! `RULESET_VERSION`.

mod aggregator;
mod answers;
mod rules;
mod strategies;

pub use aggregator::TraitAggregator;
pub use answers::{
    AssessmentAnswers, EnergyPattern, FocusStyle, LearningPreference, OverwhelmResponse,
    RoutinePreference, SensorySensitivity, SocialEnergy, TaskInitiation, TransitionDifficulty,
};
pub use rules::{AssessmentInputs, RuleBlock, RULESET_VERSION, RULE_BLOCKS};
pub use strategies::support_strategies;
