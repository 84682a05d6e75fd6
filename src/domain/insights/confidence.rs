//! Confidence scoring for candidate insights.

/// Evidence a pattern family gathered for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evidence {
    /// Observations behind the statistic.
    pub sample_count: u32,
    /// Normalised dispersion of the group; `None` when not measurable.
    pub dispersion: Option<f64>,
    /// Uses of the tool or context the finding is about.
    pub usage_count: u32,
}

/// Maps evidence to a confidence in [0, 1].
pub trait ConfidenceModel: Send + Sync {
    fn score(&self, evidence: &Evidence) -> f64;
}

/// Additive point heuristic.
///
/// Base 0.5, plus 0.2 for more than ten samples, plus 0.2 for dispersion
/// below 0.3, plus 0.1 for more than five uses. Capped at 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicConfidence;

impl HeuristicConfidence {
    const BASE: f64 = 0.5;
    const SAMPLE_BONUS: f64 = 0.2;
    const SAMPLE_MIN: u32 = 10;
    const LOW_DISPERSION_BONUS: f64 = 0.2;
    const LOW_DISPERSION: f64 = 0.3;
    const USAGE_BONUS: f64 = 0.1;
    const USAGE_MIN: u32 = 5;
}

impl ConfidenceModel for HeuristicConfidence {
    fn score(&self, evidence: &Evidence) -> f64 {
        let mut confidence = Self::BASE;
        if evidence.sample_count > Self::SAMPLE_MIN {
            confidence += Self::SAMPLE_BONUS;
        }
        if evidence.dispersion.is_some_and(|d| d < Self::LOW_DISPERSION) {
            confidence += Self::LOW_DISPERSION_BONUS;
        }
        if evidence.usage_count > Self::USAGE_MIN {
            confidence += Self::USAGE_BONUS;
        }
        confidence.min(1.0)
    }
}
