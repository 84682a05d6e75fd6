//! Recommendations module - templates, presentation gating and feedback.
//!
//! Recommendations are derived on demand from the insight log and never
//! stored. Accepting one turns its insight into a `ProfilePatch`; rejecting
//! one only marks the insight actioned.

mod feedback;
mod gating;
mod recommendation;
mod templates;

pub use feedback::feedback_patch;
pub use gating::PresentationPolicy;
pub use recommendation::{Priority, Recommendation};
pub use templates::{recommend, template_for, Template};
