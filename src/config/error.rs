//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Interval must be greater than zero: {0}")]
    ZeroInterval(&'static str),

    #[error("Threshold must be in (0, 1]: {0}")]
    ThresholdOutOfRange(&'static str),

    #[error("Value must be greater than zero: {0}")]
    MustBePositive(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
