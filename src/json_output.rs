//! JSON output format for run reports
//!
//! --format json prints a single document on stdout once every phase has
//! finished. Progress lines are suppressed in this mode.

use crate::config::WorkloadConfig;
use crate::stats::{PhaseOutcome, RunReport};
use serde::{Deserialize, Serialize};

/// Totals over every phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTotals {
    pub phases: usize,
    pub wall_secs: f64,
    pub cpu_secs: f64,
    pub peak_rss_kb: u64,
}

/// Complete JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    pub version: String,
    pub seed: u64,
    pub config: WorkloadConfig,
    pub phases: Vec<PhaseOutcome>,
    pub totals: JsonTotals,
}

impl JsonOutput {
    pub fn new(report: &RunReport, config: &WorkloadConfig) -> Self {
        let totals = report.totals();
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            seed: report.seed,
            config: config.clone(),
            phases: report.outcomes().to_vec(),
            totals: JsonTotals {
                phases: report.outcomes().len(),
                wall_secs: totals.wall.as_secs_f64(),
                cpu_secs: totals.cpu.as_secs_f64(),
                peak_rss_kb: totals.peak_rss_kb,
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
