//! Engine configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PERSONALIZATION`
//! prefix and nested values are separated by double underscores. Every
//! section has defaults, so an empty environment yields a working
//! in-memory engine.
//!
//! # Example
//!
//! ```no_run
//! use personalization_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Behavioral cadence: {:?}", config.analysis.behavioral_interval());
//! ```

mod analysis;
mod error;
mod presentation;
mod storage;
mod telemetry;

pub use analysis::AnalysisConfig;
pub use error::{ConfigError, ValidationError};
pub use presentation::PresentationConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

use crate::application::SessionSettings;
use crate::domain::insights::RecognizerSettings;
use crate::domain::recommendations::PresentationPolicy;

/// Root engine configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Analysis cadences, cool-downs and insight retention
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Recommendation presentation gating
    #[serde(default)]
    pub presentation: PresentationConfig,

    /// Storage backend selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and format
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `PERSONALIZATION__ANALYSIS__BEHAVIORAL_INTERVAL_SECS=600` -> `analysis.behavioral_interval_secs = 600`
    /// - `PERSONALIZATION__STORAGE__BACKEND=file` -> `storage.backend = file`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PERSONALIZATION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis.validate()?;
        self.presentation.validate()?;
        self.storage.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Recognizer tunables. The presentation threshold doubles as the
    /// first-sight presentability cut-off.
    pub fn recognizer_settings(&self) -> RecognizerSettings {
        RecognizerSettings {
            insight_cooldown_hours: self.analysis.insight_cooldown_hours,
            growth_cooldown_hours: self.analysis.growth_cooldown_hours,
            presentation_threshold: self.presentation.confidence_threshold,
            retention_days: self.analysis.insight_retention_days,
            max_retained: self.analysis.max_retained_insights,
        }
    }

    pub fn presentation_policy(&self) -> PresentationPolicy {
        PresentationPolicy {
            confidence_threshold: self.presentation.confidence_threshold,
            eligibility_days: self.presentation.eligibility_days,
            cooldown_minutes: self.presentation.recommendation_cooldown_minutes,
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            recognizer: self.recognizer_settings(),
            presentation: self.presentation_policy(),
        }
    }
}
