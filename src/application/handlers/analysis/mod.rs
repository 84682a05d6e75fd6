//! Analysis handlers.

mod run_analysis_cycle;

pub use run_analysis_cycle::{RunAnalysisCycleCommand, RunAnalysisCycleHandler};
