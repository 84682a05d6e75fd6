//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the personalization domain.

mod command;
mod errors;
mod ids;
mod state_machine;
mod time_of_day;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EventId, InsightId, UserId};
pub use state_machine::StateMachine;
pub use time_of_day::TimeOfDay;
pub use timestamp::Timestamp;
