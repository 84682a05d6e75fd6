//! In-memory adapters for tests and development.

mod event_log;
mod insight_store;
mod profile_store;

pub use event_log::InMemoryEventLog;
pub use insight_store::InMemoryInsightStore;
pub use profile_store::InMemoryProfileStore;
