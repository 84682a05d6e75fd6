//! Usage handlers.

mod record_usage;

pub use record_usage::{RecordUsageCommand, RecordUsageHandler};
