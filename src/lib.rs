//! Personalization Engine - trait inference and adaptive recommendations
//!
//! This crate turns diagnostic mini-game telemetry and a questionnaire into a
//! behavioural trait profile, then mines the learner's tool-usage history for
//! patterns and offers one adaptation at a time. Accepted adaptations are
//! merged back into the profile.
//!
//! # Layers
//!
//! - `domain` - Pure profile, scoring, aggregation and pattern logic
//! - `ports` - Storage and clock traits
//! - `adapters` - In-memory, file and PostgreSQL implementations
//! - `application` - Handlers, sessions, the engine and the scheduler
//! - `config` - Environment-driven configuration
//! - `telemetry` - Tracing subscriber setup

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
