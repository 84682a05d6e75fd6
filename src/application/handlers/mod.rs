//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations for one
//! learner. Every handler takes `CommandMetadata`, whose `issued_at` is the
//! evaluation instant.

pub mod analysis;
pub mod assessment;
pub mod recommendation;
pub mod usage;

pub use analysis::{RunAnalysisCycleCommand, RunAnalysisCycleHandler};
pub use assessment::{
    SubmitAssessmentCommand, SubmitAssessmentHandler, SubmitGameSessionCommand,
    SubmitGameSessionHandler,
};
pub use recommendation::{
    GetPendingRecommendationHandler, ResolveRecommendationCommand, ResolveRecommendationHandler,
    ResolveRecommendationResult,
};
pub use usage::{RecordUsageCommand, RecordUsageHandler};
