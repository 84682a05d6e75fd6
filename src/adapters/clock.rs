//! Clock adapters.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to. Second resolution.
#[derive(Debug)]
pub struct ManualClock {
    unix_secs: AtomicI64,
}

impl ManualClock {
    pub fn at(start: Timestamp) -> Self {
        Self {
            unix_secs: AtomicI64::new(start.as_unix_secs()),
        }
    }

    pub fn set(&self, to: Timestamp) {
        self.unix_secs.store(to.as_unix_secs(), Ordering::SeqCst);
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.unix_secs.fetch_add(minutes * 60, Ordering::SeqCst);
    }

    pub fn advance_days(&self, days: i64) {
        self.unix_secs.fetch_add(days * 86_400, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_secs(self.unix_secs.load(Ordering::SeqCst))
    }
}
