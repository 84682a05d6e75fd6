//! GetPendingRecommendation - Query handler for the one recommendation to
//! surface right now.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::recommendations::{PresentationPolicy, Recommendation};
use crate::ports::InsightStore;

pub struct GetPendingRecommendationHandler {
    insight_store: Arc<dyn InsightStore>,
    policy: PresentationPolicy,
}

impl GetPendingRecommendationHandler {
    pub fn new(insight_store: Arc<dyn InsightStore>, policy: PresentationPolicy) -> Self {
        Self {
            insight_store,
            policy,
        }
    }

    pub async fn handle(&self, metadata: &CommandMetadata) -> Result<Option<Recommendation>, DomainError> {
        let log = self.insight_store.load_log(&metadata.user_id).await?;
        let pending = self.policy.select(&log, metadata.issued_at);
        debug!(
            user_id = %metadata.user_id,
            logged = log.len(),
            pending = pending.is_some(),
            "Pending recommendation selected"
        );
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryInsightStore;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::insights::{Insight, InsightLog, InsightPayload};

    fn metadata() -> CommandMetadata {
        CommandMetadata::at(UserId::new("learner-1").unwrap(), Timestamp::from_unix_secs(1_700_000_000))
    }

    #[tokio::test]
    async fn nothing_pending_for_new_user() {
        let handler =
            GetPendingRecommendationHandler::new(Arc::new(InMemoryInsightStore::new()), PresentationPolicy::default());
        assert!(handler.handle(&metadata()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn presentable_insight_is_surfaced() {
        let store = Arc::new(InMemoryInsightStore::new());
        let insight = Insight::new(
            InsightPayload::FlowState { sessions: 4, mean_minutes: 45.0 },
            0.9,
            4,
            14,
            metadata().issued_at.minus_hours(2),
        )
        .with_presentable(true);
        let id = insight.id();
        let mut log = InsightLog::new();
        log.append(insight);
        store.save_log(&metadata().user_id, &log).await.unwrap();

        let handler = GetPendingRecommendationHandler::new(store, PresentationPolicy::default());
        let rec = handler.handle(&metadata()).await.unwrap().unwrap();
        assert_eq!(rec.insight_id, id);
    }
}
