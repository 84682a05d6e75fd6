//! Assessment handlers: game sessions and questionnaire submission.

mod submit_assessment;
mod submit_game_session;

pub use submit_assessment::{SubmitAssessmentCommand, SubmitAssessmentHandler};
pub use submit_game_session::{SubmitGameSessionCommand, SubmitGameSessionHandler};
