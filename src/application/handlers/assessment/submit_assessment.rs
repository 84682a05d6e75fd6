//! SubmitAssessment - Command handler turning one assessment sitting into
//! the learner's profile.

use std::sync::Arc;

use tracing::info;

use crate::application::ProfileWriter;
use crate::domain::assessment::{AssessmentAnswers, TraitAggregator};
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::Profile;
use crate::domain::signals::IndicatorSet;

/// Command to aggregate questionnaire answers and game indicators.
#[derive(Debug, Clone)]
pub struct SubmitAssessmentCommand {
    pub answers: AssessmentAnswers,
    pub indicators: IndicatorSet,
}

/// Handler for assessment submission.
///
/// The aggregate replaces the assessed sections of the stored profile but
/// keeps its identity, version history and tool preferences.
pub struct SubmitAssessmentHandler {
    writer: Arc<ProfileWriter>,
}

impl SubmitAssessmentHandler {
    pub fn new(writer: Arc<ProfileWriter>) -> Self {
        Self { writer }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAssessmentCommand,
        metadata: &CommandMetadata,
    ) -> Result<Profile, DomainError> {
        let assessed = TraitAggregator::aggregate(
            metadata.user_id.clone(),
            &cmd.indicators,
            &cmd.answers,
            metadata.issued_at,
        );

        let profile = self
            .writer
            .update(metadata.issued_at, |profile| profile.adopt_assessment(&assessed))
            .await?;

        info!(
            user_id = %metadata.user_id,
            version = %profile.version(),
            indicators = cmd.indicators.len(),
            "Assessment applied to profile"
        );
        Ok(profile)
    }
}
