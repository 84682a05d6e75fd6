//! ResolveRecommendation - Command handler for the user's accept/reject
//! answer, closing the feedback loop.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::application::ProfileWriter;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, InsightId};
use crate::domain::profile::Profile;
use crate::domain::recommendations::feedback_patch;
use crate::ports::InsightStore;

#[derive(Debug, Clone)]
pub struct ResolveRecommendationCommand {
    pub insight_id: InsightId,
    pub accepted: bool,
}

#[derive(Debug, Clone)]
pub struct ResolveRecommendationResult {
    pub insight_id: InsightId,
    /// False when the insight had already been actioned; nothing changed.
    pub newly_resolved: bool,
    /// The merged profile when an accepted insight changed it.
    pub profile: Option<Profile>,
}

/// Handler for resolving recommendations.
///
/// Acceptance applies the insight's feedback patch through the profile
/// writer before the insight is marked actioned, so a failed profile write
/// leaves the insight pending. Rejection only marks it actioned.
pub struct ResolveRecommendationHandler {
    insight_store: Arc<dyn InsightStore>,
    writer: Arc<ProfileWriter>,
    log_lock: Arc<Mutex<()>>,
}

impl ResolveRecommendationHandler {
    pub fn new(
        insight_store: Arc<dyn InsightStore>,
        writer: Arc<ProfileWriter>,
        log_lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            insight_store,
            writer,
            log_lock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResolveRecommendationCommand,
        metadata: &CommandMetadata,
    ) -> Result<ResolveRecommendationResult, DomainError> {
        let _guard = self.log_lock.lock().await;
        let mut log = self.insight_store.load_log(&metadata.user_id).await?;

        let insight = log
            .get(cmd.insight_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(ErrorCode::InsightNotFound, "Insight not found")
                    .with_detail("insight_id", cmd.insight_id.to_string())
            })?;

        if insight.is_actioned() {
            return Ok(ResolveRecommendationResult {
                insight_id: cmd.insight_id,
                newly_resolved: false,
                profile: None,
            });
        }

        let mut profile = None;
        if cmd.accepted {
            match feedback_patch(&insight) {
                Some(patch) => {
                    let merged = self
                        .writer
                        .update(metadata.issued_at, |p| p.apply_patch(&patch))
                        .await?;
                    profile = Some(merged);
                }
                None => {
                    warn!(user_id = %metadata.user_id, insight_id = %cmd.insight_id, insight_type = %insight.insight_type(), "Accepted insight has no feedback patch");
                }
            }
        }

        log.resolve(cmd.insight_id, metadata.issued_at)?;
        self.insight_store.save_log(&metadata.user_id, &log).await?;

        info!(
            user_id = %metadata.user_id,
            insight_id = %cmd.insight_id,
            insight_type = %insight.insight_type(),
            accepted = cmd.accepted,
            "Recommendation resolved"
        );
        Ok(ResolveRecommendationResult {
            insight_id: cmd.insight_id,
            newly_resolved: true,
            profile,
        })
    }
}
