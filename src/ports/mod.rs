//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `ProfileStore` - Profile persistence with optimistic version checks
//! - `EventLog` - Append-only usage event log with windowed queries
//! - `InsightStore` - Per-user insight log persistence
//!
//! ## Time
//!
//! - `Clock` - Evaluation instant for session operations

mod clock;
mod event_log;
mod insight_store;
mod profile_store;

pub use clock::Clock;
pub use event_log::EventLog;
pub use insight_store::InsightStore;
pub use profile_store::ProfileStore;
