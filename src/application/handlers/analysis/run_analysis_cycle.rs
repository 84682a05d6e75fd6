//! RunAnalysisCycle - Command handler for one pattern-recognition pass.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::application::ProfileWriter;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::insights::{max_window_days, AnalysisKind, CycleReport, PatternRecognizer};
use crate::domain::usage::EventWindow;
use crate::ports::{EventLog, InsightStore};

#[derive(Debug, Clone, Copy)]
pub struct RunAnalysisCycleCommand {
    pub kind: AnalysisKind,
}

/// Handler for analysis cycles.
///
/// Reads an owned snapshot of the event log, so concurrent appends are
/// never blocked; they simply land in the next cycle's window.
pub struct RunAnalysisCycleHandler {
    event_log: Arc<dyn EventLog>,
    insight_store: Arc<dyn InsightStore>,
    writer: Arc<ProfileWriter>,
    recognizer: PatternRecognizer,
    log_lock: Arc<Mutex<()>>,
}

impl RunAnalysisCycleHandler {
    pub fn new(
        event_log: Arc<dyn EventLog>,
        insight_store: Arc<dyn InsightStore>,
        writer: Arc<ProfileWriter>,
        recognizer: PatternRecognizer,
        log_lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            event_log,
            insight_store,
            writer,
            recognizer,
            log_lock,
        }
    }

    pub async fn handle(
        &self,
        cmd: RunAnalysisCycleCommand,
        metadata: &CommandMetadata,
    ) -> Result<CycleReport, DomainError> {
        let now = metadata.issued_at;
        let profile = self.writer.current(now).await?;

        let since = now.minus_days(i64::from(max_window_days(cmd.kind)));
        let events = self.event_log.query_events(&metadata.user_id, since).await?;
        let window = EventWindow::new(events, now);

        let _guard = self.log_lock.lock().await;
        let mut log = self.insight_store.load_log(&metadata.user_id).await?;
        let report = self.recognizer.run(cmd.kind, &profile, &window, &mut log);

        if report.emitted_count() > 0 || report.pruned > 0 {
            self.insight_store.save_log(&metadata.user_id, &log).await?;
        } else {
            debug!(user_id = %metadata.user_id, kind = %cmd.kind, "Insight log unchanged");
        }

        info!(
            user_id = %metadata.user_id,
            kind = %cmd.kind,
            window_events = report.window_events,
            emitted = report.emitted_count(),
            gated = report.gates.len(),
            pruned = report.pruned,
            "Analysis cycle finished"
        );
        Ok(report)
    }
}
