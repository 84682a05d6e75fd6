//! Clock port - the engine's only source of "now".

use crate::domain::foundation::Timestamp;

/// Supplies the evaluation instant for session operations.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
