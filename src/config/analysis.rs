//! Analysis cadence and insight retention configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Analysis configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Seconds between behavioural analysis cycles (hourly by default)
    #[serde(default = "default_behavioral_interval")]
    pub behavioral_interval_secs: u64,

    /// Seconds between growth analysis cycles (daily by default)
    #[serde(default = "default_growth_interval")]
    pub growth_interval_secs: u64,

    /// Cool-down before an equivalent behavioural insight may reappear
    #[serde(default = "default_insight_cooldown")]
    pub insight_cooldown_hours: u32,

    /// Cool-down before an equivalent growth insight may reappear
    #[serde(default = "default_growth_cooldown")]
    pub growth_cooldown_hours: u32,

    /// Insights older than this are pruned from the log
    #[serde(default = "default_retention_days")]
    pub insight_retention_days: u32,

    /// Cap on logged insights per user
    #[serde(default = "default_max_retained")]
    pub max_retained_insights: usize,
}

impl AnalysisConfig {
    pub fn behavioral_interval(&self) -> Duration {
        Duration::from_secs(self.behavioral_interval_secs)
    }

    pub fn growth_interval(&self) -> Duration {
        Duration::from_secs(self.growth_interval_secs)
    }

    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.behavioral_interval_secs == 0 {
            return Err(ValidationError::ZeroInterval("analysis.behavioral_interval_secs"));
        }
        if self.growth_interval_secs == 0 {
            return Err(ValidationError::ZeroInterval("analysis.growth_interval_secs"));
        }
        if self.insight_retention_days == 0 {
            return Err(ValidationError::MustBePositive("analysis.insight_retention_days"));
        }
        if self.max_retained_insights == 0 {
            return Err(ValidationError::MustBePositive("analysis.max_retained_insights"));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            behavioral_interval_secs: default_behavioral_interval(),
            growth_interval_secs: default_growth_interval(),
            insight_cooldown_hours: default_insight_cooldown(),
            growth_cooldown_hours: default_growth_cooldown(),
            insight_retention_days: default_retention_days(),
            max_retained_insights: default_max_retained(),
        }
    }
}

fn default_behavioral_interval() -> u64 {
    3600
}

fn default_growth_interval() -> u64 {
    86_400
}

fn default_insight_cooldown() -> u32 {
    24
}

fn default_growth_cooldown() -> u32 {
    168
}

fn default_retention_days() -> u32 {
    90
}

fn default_max_retained() -> usize {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_hourly_and_daily() {
        let config = AnalysisConfig::default();
        assert_eq!(config.behavioral_interval(), Duration::from_secs(3600));
        assert_eq!(config.growth_interval(), Duration::from_secs(86_400));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = AnalysisConfig {
            growth_interval_secs: 0,
            ..AnalysisConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::ZeroInterval("analysis.growth_interval_secs"))
        );
    }
}
