//! Domain layer containing the personalization engine's business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, time-of-day, errors)
//! - `profile` - The learner profile aggregate and its patch/merge rules
//! - `signals` - Game telemetry reduction into indicators
//! - `assessment` - Rule-based trait aggregation from one assessment sitting
//! - `usage` - Tool-usage events and windowed snapshots
//! - `insights` - Pattern recognition over usage history
//! - `recommendations` - Insight presentation and the feedback loop
//!
//! Everything here is pure: no I/O, no clocks read implicitly, no shared
//! mutable state.

pub mod assessment;
pub mod foundation;
pub mod insights;
pub mod profile;
pub mod recommendations;
pub mod signals;
pub mod usage;
