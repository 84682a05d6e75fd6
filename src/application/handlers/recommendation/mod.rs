//! Recommendation handlers: presentation and the feedback loop.

mod get_pending_recommendation;
mod resolve_recommendation;

pub use get_pending_recommendation::GetPendingRecommendationHandler;
pub use resolve_recommendation::{
    ResolveRecommendationCommand, ResolveRecommendationHandler, ResolveRecommendationResult,
};
