//! Adapters - Implementations of port interfaces.
//!
//! - `clock` - System and manually driven clocks
//! - `memory` - In-process stores for tests and development
//! - `file` - YAML and JSON-lines stores under a data directory
//! - `postgres` - PostgreSQL stores with embedded migrations

pub mod clock;
pub mod file;
pub mod memory;
pub mod postgres;

pub use clock::{ManualClock, SystemClock};
pub use file::{FileEventLog, FileInsightStore, FileProfileStore};
pub use memory::{InMemoryEventLog, InMemoryInsightStore, InMemoryProfileStore};
pub use postgres::{PostgresEventLog, PostgresInsightStore, PostgresProfileStore};
