//! AnalysisScheduler - fixed-cadence pattern recognition for open sessions.
//!
//! Two cadences run independently: behavioural (hourly by default) and
//! growth (daily by default). Each tick spawns one cycle per open session.
//! A cadence never overlaps itself; a tick that fires while the previous
//! cycle of the same cadence is still running is skipped.
//!
//! ## Graceful Shutdown
//!
//! The scheduler listens on a `watch` channel and waits for in-flight
//! cycles before returning.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinSet;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::PersonalizationEngine;
use crate::config::AnalysisConfig;
use crate::domain::insights::AnalysisKind;

/// Cadences for the scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub behavioral_interval: Duration,
    pub growth_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            behavioral_interval: Duration::from_secs(3600),
            growth_interval: Duration::from_secs(86_400),
        }
    }
}

impl SchedulerConfig {
    pub fn with_behavioral_interval(mut self, interval: Duration) -> Self {
        self.behavioral_interval = interval;
        self
    }

    pub fn with_growth_interval(mut self, interval: Duration) -> Self {
        self.growth_interval = interval;
        self
    }
}

impl From<&AnalysisConfig> for SchedulerConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            behavioral_interval: config.behavioral_interval(),
            growth_interval: config.growth_interval(),
        }
    }
}

/// Outcome of one cadence run across all open sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CadenceSummary {
    pub sessions: usize,
    pub insights_emitted: usize,
    pub failures: usize,
}

pub struct AnalysisScheduler {
    engine: Arc<PersonalizationEngine>,
    config: SchedulerConfig,
    behavioral_guard: Mutex<()>,
    growth_guard: Mutex<()>,
    completed_runs: AtomicU64,
}

impl AnalysisScheduler {
    pub fn new(engine: Arc<PersonalizationEngine>, config: SchedulerConfig) -> Self {
        Self {
            engine,
            config,
            behavioral_guard: Mutex::new(()),
            growth_guard: Mutex::new(()),
            completed_runs: AtomicU64::new(0),
        }
    }

    fn guard(&self, kind: AnalysisKind) -> &Mutex<()> {
        match kind {
            AnalysisKind::Behavioral => &self.behavioral_guard,
            AnalysisKind::Growth => &self.growth_guard,
        }
    }

    /// Cadence runs that finished (not skipped) since construction.
    pub fn completed_runs(&self) -> u64 {
        self.completed_runs.load(Ordering::Relaxed)
    }

    /// Run both cadences until the shutdown signal fires. The first cycle
    /// of each cadence starts one full interval after the call.
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let mut behavioral = cadence_interval(self.config.behavioral_interval);
        let mut growth = cadence_interval(self.config.growth_interval);
        let mut in_flight = JoinSet::new();

        info!(
            behavioral_secs = self.config.behavioral_interval.as_secs(),
            growth_secs = self.config.growth_interval.as_secs(),
            "Analysis scheduler started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }

                _ = behavioral.tick() => {
                    let this = self.clone();
                    in_flight.spawn(async move { this.run_cadence(AnalysisKind::Behavioral).await });
                }

                _ = growth.tick() => {
                    let this = self.clone();
                    in_flight.spawn(async move { this.run_cadence(AnalysisKind::Growth).await });
                }

                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }

        while in_flight.join_next().await.is_some() {}
        info!("Analysis scheduler stopped");
    }

    /// One cadence across every open session. `None` when the previous run
    /// of this cadence is still in progress.
    pub async fn run_cadence(&self, kind: AnalysisKind) -> Option<CadenceSummary> {
        let Ok(_running) = self.guard(kind).try_lock() else {
            warn!(kind = %kind, "Previous analysis cycle still running, tick skipped");
            return None;
        };

        let sessions = self.engine.open_sessions().await;
        let reports = join_all(sessions.iter().map(|s| s.run_analysis_cycle(kind))).await;

        let mut summary = CadenceSummary {
            sessions: sessions.len(),
            ..CadenceSummary::default()
        };
        for (session, report) in sessions.iter().zip(reports) {
            match report {
                Ok(report) => summary.insights_emitted += report.emitted_count(),
                Err(e) => {
                    summary.failures += 1;
                    warn!(user_id = %session.user_id(), kind = %kind, error = %e, "Analysis cycle failed");
                }
            }
        }

        self.completed_runs.fetch_add(1, Ordering::Relaxed);
        debug!(
            kind = %kind,
            sessions = summary.sessions,
            emitted = summary.insights_emitted,
            failures = summary.failures,
            "Analysis cadence finished"
        );
        Some(summary)
    }
}

fn cadence_interval(period: Duration) -> time::Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}
