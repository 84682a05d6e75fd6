//! Presentation gating: at most one recommendation at a time.

use std::cmp::Ordering;

use super::recommendation::Recommendation;
use super::templates::recommend;
use crate::domain::foundation::Timestamp;
use crate::domain::insights::{Insight, InsightLog};

#[derive(Debug, Clone, PartialEq)]
pub struct PresentationPolicy {
    pub confidence_threshold: f64,
    /// Only insights from the trailing window are eligible.
    pub eligibility_days: u32,
    /// Quiet period after the user resolves a recommendation.
    pub cooldown_minutes: u32,
}

impl Default for PresentationPolicy {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.8,
            eligibility_days: 7,
            cooldown_minutes: 60,
        }
    }
}

impl PresentationPolicy {
    fn is_eligible(&self, insight: &Insight, now: Timestamp) -> bool {
        let since = now.minus_days(i64::from(self.eligibility_days));
        !insight.is_actioned()
            && insight.is_presentable()
            && !insight.created_at().is_before(&since)
            && !insight.created_at().is_after(&now)
    }

    fn in_quiet_period(&self, log: &InsightLog, now: Timestamp) -> bool {
        log.last_resolved_at().is_some_and(|at| {
            !at.is_before(&now.minus_minutes(i64::from(self.cooldown_minutes)))
        })
    }

    /// The single recommendation to surface now, if any.
    ///
    /// Highest confidence wins; on ties the newest insight wins.
    pub fn select(&self, log: &InsightLog, now: Timestamp) -> Option<Recommendation> {
        if self.in_quiet_period(log, now) {
            return None;
        }
        let mut eligible: Vec<&Insight> = log
            .insights()
            .iter()
            .filter(|i| self.is_eligible(i, now))
            .collect();
        eligible.sort_by(|a, b| {
            b.confidence()
                .partial_cmp(&a.confidence())
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.created_at().cmp(&a.created_at()))
        });
        eligible
            .into_iter()
            .find_map(|i| recommend(i, self.confidence_threshold))
    }
}
