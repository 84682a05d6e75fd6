//! Per-user insight log: append-only, pruned by a rolling window.

use serde::{Deserialize, Serialize};

use super::insight::{Insight, InsightType};
use crate::domain::foundation::{DomainError, ErrorCode, InsightId, Timestamp};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsightLog {
    #[serde(default)]
    insights: Vec<Insight>,
    /// When the user last accepted or rejected a recommendation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_resolved_at: Option<Timestamp>,
}

impl InsightLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insights(&self) -> &[Insight] {
        &self.insights
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    pub fn get(&self, id: InsightId) -> Option<&Insight> {
        self.insights.iter().find(|i| i.id() == id)
    }

    pub fn last_resolved_at(&self) -> Option<Timestamp> {
        self.last_resolved_at
    }

    pub fn append(&mut self, insight: Insight) {
        self.insights.push(insight);
    }

    /// True when an insight with this fingerprint was emitted within the
    /// trailing `cooldown_hours`.
    pub fn in_cooldown(&self, fingerprint: &str, now: Timestamp, cooldown_hours: u32) -> bool {
        let since = now.minus_hours(i64::from(cooldown_hours));
        self.insights
            .iter()
            .any(|i| i.fingerprint() == fingerprint && !i.created_at().is_before(&since))
    }

    /// True when an earlier, still unresolved insight exists for the same type
    /// and topic. Resolved insights never reinforce.
    pub fn has_prior(&self, insight_type: InsightType, topic: &str) -> bool {
        self.insights.iter().any(|i| {
            !i.is_actioned() && i.insight_type() == insight_type && i.topic() == topic
        })
    }

    /// True when the user already accepted or rejected an insight with the
    /// candidate's fingerprint and the same conclusion.
    pub fn resolved_alike(&self, candidate: &Insight) -> bool {
        let conclusion = candidate.payload().conclusion();
        self.insights.iter().any(|i| {
            i.is_actioned()
                && i.fingerprint() == candidate.fingerprint()
                && i.payload().conclusion() == conclusion
        })
    }

    /// Marks an insight actioned and records the resolution time.
    ///
    /// Returns `Ok(false)` when the insight was already actioned.
    ///
    /// # Errors
    ///
    /// `InsightNotFound` when no insight has this id.
    pub fn resolve(&mut self, id: InsightId, at: Timestamp) -> Result<bool, DomainError> {
        let insight = self
            .insights
            .iter_mut()
            .find(|i| i.id() == id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::InsightNotFound, "Insight not found")
                    .with_detail("insight_id", id.to_string())
            })?;
        if insight.is_actioned() {
            return Ok(false);
        }
        insight.mark_actioned();
        self.last_resolved_at = Some(at);
        Ok(true)
    }

    /// Drops insights older than `retention_days`, then keeps only the newest
    /// `max_retained`. Returns how many were removed.
    pub fn prune(&mut self, now: Timestamp, retention_days: u32, max_retained: usize) -> usize {
        let before = self.insights.len();
        let cutoff = now.minus_days(i64::from(retention_days));
        self.insights.retain(|i| !i.created_at().is_before(&cutoff));

        if self.insights.len() > max_retained {
            self.insights.sort_by_key(|i| i.created_at());
            let excess = self.insights.len() - max_retained;
            self.insights.drain(..excess);
        }
        before - self.insights.len()
    }
}
