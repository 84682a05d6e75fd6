//! Recommendation presentation configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PresentationConfig {
    /// Confidence above which a new insight is presentable and high priority
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Trailing days of insights eligible for presentation
    #[serde(default = "default_eligibility_days")]
    pub eligibility_days: u32,

    /// Quiet period after the user resolves a recommendation
    #[serde(default = "default_cooldown_minutes")]
    pub recommendation_cooldown_minutes: u32,
}

impl PresentationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.confidence_threshold > 0.0 && self.confidence_threshold <= 1.0) {
            return Err(ValidationError::ThresholdOutOfRange("presentation.confidence_threshold"));
        }
        if self.eligibility_days == 0 {
            return Err(ValidationError::MustBePositive("presentation.eligibility_days"));
        }
        Ok(())
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            eligibility_days: default_eligibility_days(),
            recommendation_cooldown_minutes: default_cooldown_minutes(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.8
}

fn default_eligibility_days() -> u32 {
    7
}

fn default_cooldown_minutes() -> u32 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds() {
        let mut config = PresentationConfig::default();
        assert!(config.validate().is_ok());

        config.confidence_threshold = 1.0;
        assert!(config.validate().is_ok());

        config.confidence_threshold = 0.0;
        assert!(config.validate().is_err());

        config.confidence_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }
}
