//! Per-phase resource measurement
//!
//! Wraps a phase with wall-clock, process CPU time and peak RSS readings so
//! the driver can report what the external profiler should have seen.
//! CPU time comes from `CLOCK_PROCESS_CPUTIME_ID`, peak RSS from
//! `getrusage(RUSAGE_SELF)`.

use nix::sys::resource::{getrusage, UsageWho};
use nix::time::{clock_gettime, ClockId};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Process CPU time consumed so far, if the clock is available
pub fn process_cpu_time() -> Option<Duration> {
    match clock_gettime(ClockId::CLOCK_PROCESS_CPUTIME_ID) {
        Ok(ts) => Some(Duration::from(ts)),
        Err(e) => {
            tracing::debug!(error = %e, "process CPU clock unavailable");
            None
        }
    }
}

/// Peak resident set size of this process in KiB
pub fn peak_rss_kb() -> Option<u64> {
    match getrusage(UsageWho::RUSAGE_SELF) {
        Ok(usage) => u64::try_from(usage.max_rss()).ok(),
        Err(e) => {
            tracing::debug!(error = %e, "getrusage failed");
            None
        }
    }
}

/// Resources consumed by one phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseMeasurement {
    /// Wall-clock duration
    #[serde(with = "duration_secs")]
    pub wall: Duration,
    /// Process CPU time spent during the phase
    #[serde(with = "duration_secs")]
    pub cpu: Duration,
    /// Process peak RSS (KiB) observed when the phase finished
    pub max_rss_kb: u64,
}

impl PhaseMeasurement {
    /// CPU time as a share of wall time, in percent
    ///
    /// Close to 100 for compute phases, lower for phases that sleep.
    pub fn cpu_utilization(&self) -> f64 {
        let wall = self.wall.as_secs_f64();
        if wall > 0.0 {
            self.cpu.as_secs_f64() / wall * 100.0
        } else {
            0.0
        }
    }
}

/// Running measurement started by [`PhaseTimer::start`]
#[derive(Debug)]
pub struct PhaseTimer {
    wall_start: Instant,
    cpu_start: Option<Duration>,
}

impl PhaseTimer {
    pub fn start() -> Self {
        Self {
            wall_start: Instant::now(),
            cpu_start: process_cpu_time(),
        }
    }

    pub fn finish(self) -> PhaseMeasurement {
        let wall = self.wall_start.elapsed();
        let cpu = match (self.cpu_start, process_cpu_time()) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => Duration::ZERO,
        };
        PhaseMeasurement {
            wall,
            cpu,
            max_rss_kb: peak_rss_kb().unwrap_or(0),
        }
    }

    /// Measure a closure
    ///
    /// # Example
    /// ```
    /// use profload::profiling::PhaseTimer;
    ///
    /// let (value, measurement) = PhaseTimer::measure(|| 6 * 7);
    /// assert_eq!(value, 42);
    /// assert!(measurement.max_rss_kb > 0);
    /// ```
    pub fn measure<F, R>(f: F) -> (R, PhaseMeasurement)
    where
        F: FnOnce() -> R,
    {
        let timer = Self::start();
        let result = f();
        (result, timer.finish())
    }
}

/// Serialize durations as fractional seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
