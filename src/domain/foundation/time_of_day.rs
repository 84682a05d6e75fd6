//! Time-of-day buckets used to group usage events.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Timestamp;

/// Coarse part of the day an event happened in (UTC hours).
///
/// - Morning: 05:00-11:59
/// - Afternoon: 12:00-16:59
/// - Evening: 17:00-20:59
/// - Night: 21:00-04:59
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// All buckets in tie-break order.
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Buckets an hour of day (0-23). Hours above 23 wrap.
    pub fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    /// Buckets a timestamp.
    pub fn of(timestamp: &Timestamp) -> Self {
        Self::from_hour(timestamp.hour())
    }

    /// Stable index into `ALL`.
    pub fn index(&self) -> usize {
        match self {
            TimeOfDay::Morning => 0,
            TimeOfDay::Afternoon => 1,
            TimeOfDay::Evening => 2,
            TimeOfDay::Night => 3,
        }
    }

    /// Lower-case label used in topics and user-facing text.
    pub fn label(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
