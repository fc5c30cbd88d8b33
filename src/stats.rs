//! Run statistics for -c mode
//!
//! Collects one [`PhaseOutcome`] per phase and prints an strace-style
//! `% time` table once the run is over.

use crate::phase::Phase;
use crate::profiling::PhaseMeasurement;
use crate::workloads::{MandelbrotSummary, MemoryStressReport};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::time::Duration;

/// Value computed by a phase, kept so the work is observable in reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PhaseDetail {
    Matrix {
        size: usize,
        iterations: usize,
        trace: f64,
    },
    Primes {
        limit: u32,
        passes: usize,
        count: usize,
        largest: Option<u32>,
    },
    Fibonacci {
        values: Vec<FibonacciValue>,
    },
    Sort {
        size: usize,
        sorted: bool,
    },
    Strings {
        iterations: usize,
        preview: String,
    },
    Memory(MemoryStressReport),
    /// Sums from the last render pass
    Mandelbrot(MandelbrotSummary),
    Nbody {
        bodies: usize,
        steps: usize,
        momentum: [f64; 3],
    },
    Spin {
        rounds: usize,
        last_sum: f64,
    },
    Mixed {
        iterations: u64,
        checksum: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FibonacciValue {
    pub n: u32,
    pub value: u64,
}

/// Result and cost of one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub measurement: PhaseMeasurement,
    pub detail: PhaseDetail,
}

/// Summary totals over all phases
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunTotals {
    pub wall: Duration,
    pub cpu: Duration,
    pub peak_rss_kb: u64,
}

/// Everything a run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub seed: u64,
    outcomes: Vec<PhaseOutcome>,
}

impl RunReport {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: PhaseOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[PhaseOutcome] {
        &self.outcomes
    }

    pub fn totals(&self) -> RunTotals {
        RunTotals {
            wall: self.outcomes.iter().map(|o| o.measurement.wall).sum(),
            cpu: self.outcomes.iter().map(|o| o.measurement.cpu).sum(),
            peak_rss_kb: self
                .outcomes
                .iter()
                .map(|o| o.measurement.max_rss_kb)
                .max()
                .unwrap_or(0),
        }
    }

    /// Print the per-phase table to stderr
    pub fn print_summary(&self) -> io::Result<()> {
        self.write_summary(&mut io::stderr().lock())
    }

    /// Write the per-phase table, slowest phase first
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.outcomes.is_empty() {
            writeln!(out, "No phases run.")?;
            return Ok(());
        }

        let totals = self.totals();
        let total_wall = totals.wall.as_secs_f64();

        let mut sorted: Vec<_> = self.outcomes.iter().collect();
        sorted.sort_by(|a, b| b.measurement.wall.cmp(&a.measurement.wall));

        writeln!(out, "% time     seconds    cpu secs   cpu %   max rss KB phase")?;
        writeln!(out, "------ ----------- ----------- ------- ------------ ----------------")?;

        for outcome in sorted {
            let m = &outcome.measurement;
            let time_percent = if total_wall > 0.0 {
                m.wall.as_secs_f64() / total_wall * 100.0
            } else {
                0.0
            };
            writeln!(
                out,
                "{:6.2} {:>11.6} {:>11.6} {:>7.1} {:>12} {}",
                time_percent,
                m.wall.as_secs_f64(),
                m.cpu.as_secs_f64(),
                m.cpu_utilization(),
                m.max_rss_kb,
                outcome.phase
            )?;
        }

        writeln!(out, "------ ----------- ----------- ------- ------------ ----------------")?;
        let total = PhaseMeasurement {
            wall: totals.wall,
            cpu: totals.cpu,
            max_rss_kb: totals.peak_rss_kb,
        };
        writeln!(
            out,
            "100.00 {:>11.6} {:>11.6} {:>7.1} {:>12} total",
            total_wall,
            totals.cpu.as_secs_f64(),
            total.cpu_utilization(),
            totals.peak_rss_kb
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(phase: Phase, wall_ms: u64, cpu_ms: u64, rss: u64) -> PhaseOutcome {
        PhaseOutcome {
            phase,
            measurement: PhaseMeasurement {
                wall: Duration::from_millis(wall_ms),
                cpu: Duration::from_millis(cpu_ms),
                max_rss_kb: rss,
            },
            detail: PhaseDetail::Sort {
                size: 10,
                sorted: true,
            },
        }
    }

    #[test]
    fn test_totals() {
        let mut report = RunReport::new(1);
        report.record(outcome(Phase::Sort, 100, 90, 2_000));
        report.record(outcome(Phase::Matrix, 300, 300, 5_000));

        let totals = report.totals();
        assert_eq!(totals.wall, Duration::from_millis(400));
        assert_eq!(totals.cpu, Duration::from_millis(390));
        assert_eq!(totals.peak_rss_kb, 5_000);
    }

    #[test]
    fn test_empty_totals() {
        let report = RunReport::new(0);
        let totals = report.totals();
        assert_eq!(totals.wall, Duration::ZERO);
        assert_eq!(totals.peak_rss_kb, 0);
    }

    #[test]
    fn test_summary_table() {
        let mut report = RunReport::new(1);
        report.record(outcome(Phase::Sort, 100, 100, 2_000));
        report.record(outcome(Phase::Matrix, 300, 300, 5_000));

        let mut buf = Vec::new();
        report.write_summary(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("% time"));
        assert!(text.contains("total"));
        assert!(text.contains(" 75.00"));
        assert!(text.contains(" 25.00"));

        // Slowest phase first
        let matrix_pos = text.find("matrix").unwrap();
        let sort_pos = text.find("sort").unwrap();
        assert!(matrix_pos < sort_pos);
    }

    #[test]
    fn test_print_summary_succeeds() {
        let mut report = RunReport::new(1);
        report.record(outcome(Phase::Sort, 10, 10, 100));
        assert!(report.print_summary().is_ok());
    }

    #[test]
    fn test_summary_empty() {
        let mut buf = Vec::new();
        RunReport::new(0).write_summary(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No phases run.\n");
    }

    #[test]
    fn test_detail_serializes_with_kind_tag() {
        let detail = PhaseDetail::Primes {
            limit: 100,
            passes: 1,
            count: 25,
            largest: Some(97),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["kind"], "primes");
        assert_eq!(json["count"], 25);
        assert_eq!(json["largest"], 97);
    }

    #[test]
    fn test_memory_detail_is_inlined() {
        let detail = PhaseDetail::Memory(MemoryStressReport {
            blocks: 3,
            ..Default::default()
        });
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["kind"], "memory");
        assert_eq!(json["blocks"], 3);
    }
}
