//! Profile module - the durable behavioral model of one learner.
//!
//! # Architecture
//!
//! A `Profile` holds ten bounded trait scores plus derived preference groups
//! (focus timing, sensory tolerances, learning style, support strategies and
//! tool preferences). Every mutation is expressed as a `ProfilePatch` and
//! merged through `Profile::apply_patch`.
//!
//! # Domain Invariants
//!
//! 1. Every trait score stays within 0-10 after any update
//! 2. Patch fields left unset never overwrite profile fields
//! 3. Strategy lists keep insertion order and duplicates
//! 4. Profile version only increases

mod patch;
mod preferences;
#[allow(clippy::module_inception)]
mod profile;
mod traits;

pub use patch::{ProfilePatch, TraitAdjustment};
pub use preferences::{
    ChunkSize, FocusTiming, LearningModality, LearningStyle, SensoryTolerances, StrategyDomain,
    SupportStrategies, ToleranceLevel, ToolPreferences, BREAK_MINUTES_RANGE,
    HYPERFOCUS_WARNING_RANGE, SESSION_MINUTES_RANGE,
};
pub use profile::{Profile, ProfileVersion, PROFILE_SCHEMA_VERSION};
pub use traits::{TraitKind, TraitScore, TraitScores};
