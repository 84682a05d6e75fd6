//! Application layer - handlers, the per-user session and the engine.
//!
//! Handlers orchestrate domain operations through ports. A
//! `PersonalizationSession` bundles them for one learner, the
//! `PersonalizationEngine` hands out sessions, and the `AnalysisScheduler`
//! drives pattern recognition on a fixed cadence.

mod engine;
pub mod handlers;
mod profile_writer;
mod scheduler;
mod session;

pub use engine::PersonalizationEngine;
pub use profile_writer::ProfileWriter;
pub use scheduler::{AnalysisScheduler, CadenceSummary, SchedulerConfig};
pub use session::{EnginePorts, PersonalizationSession, SessionSettings};
