//! Owned snapshot of a user's recent usage events.

use super::event::UsageEvent;
use crate::domain::foundation::Timestamp;

/// Events read once from the log, ordered by `recorded_at` ascending.
///
/// Appends after the read are not seen; callers re-query for a fresh window.
#[derive(Debug, Clone, Default)]
pub struct EventWindow {
    events: Vec<UsageEvent>,
    as_of: Timestamp,
}

impl EventWindow {
    /// Builds a window, dropping anything recorded after `as_of`.
    pub fn new(mut events: Vec<UsageEvent>, as_of: Timestamp) -> Self {
        events.retain(|e| !e.recorded_at.is_after(&as_of));
        events.sort_by_key(|e| e.recorded_at);
        Self { events, as_of }
    }

    pub fn as_of(&self) -> Timestamp {
        self.as_of
    }

    pub fn events(&self) -> &[UsageEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded within the trailing `days`.
    pub fn trailing(&self, days: u32) -> Vec<&UsageEvent> {
        let since = self.as_of.minus_days(i64::from(days));
        self.events
            .iter()
            .filter(|e| !e.recorded_at.is_before(&since))
            .collect()
    }

    /// Splits the trailing `days` into an older and a newer half.
    pub fn halves(&self, days: u32) -> (Vec<&UsageEvent>, Vec<&UsageEvent>) {
        let since = self.as_of.minus_days(i64::from(days));
        let midpoint = Timestamp::from_unix_secs(
            since.as_unix_secs() + (self.as_of.as_unix_secs() - since.as_unix_secs()) / 2,
        );
        self.trailing(days)
            .into_iter()
            .partition(|e| e.recorded_at.is_before(&midpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_700_006_400;

    fn event_days_ago(days: i64) -> UsageEvent {
        UsageEvent::new("focus_timer", json!({}), Timestamp::from_unix_secs(NOW - days * 86_400)).unwrap()
    }

    #[test]
    fn window_sorts_and_drops_future_events() {
        let window = EventWindow::new(
            vec![event_days_ago(1), event_days_ago(5), event_days_ago(-1)],
            Timestamp::from_unix_secs(NOW),
        );
        assert_eq!(window.len(), 2);
        assert!(window.events()[0].recorded_at.is_before(&window.events()[1].recorded_at));
    }

    #[test]
    fn trailing_filters_by_age() {
        let window = EventWindow::new(
            vec![event_days_ago(1), event_days_ago(6), event_days_ago(10), event_days_ago(29)],
            Timestamp::from_unix_secs(NOW),
        );
        assert_eq!(window.trailing(7).len(), 2);
        assert_eq!(window.trailing(14).len(), 3);
        assert_eq!(window.trailing(30).len(), 4);
    }

    #[test]
    fn halves_split_on_midpoint() {
        let window = EventWindow::new(
            vec![event_days_ago(2), event_days_ago(12), event_days_ago(20), event_days_ago(25)],
            Timestamp::from_unix_secs(NOW),
        );
        let (older, newer) = window.halves(30);
        assert_eq!(older.len(), 2);
        assert_eq!(newer.len(), 2);
    }
}
