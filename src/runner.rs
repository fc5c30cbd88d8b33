//! Phase driver
//!
//! Runs the selected phases one after another, printing progress lines to the
//! given writer and recording a [`PhaseOutcome`] for each. Every phase runs
//! to completion before the next one starts.

use crate::config::WorkloadConfig;
use crate::filter::PhaseFilter;
use crate::phase::Phase;
use crate::profiling::PhaseTimer;
use crate::stats::{FibonacciValue, PhaseDetail, PhaseOutcome, RunReport};
use crate::workloads::{
    fibonacci, mandelbrot, matrix, memory, mixed, nbody, primes, sort, spin, strings,
};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use std::io::Write;
use std::thread;
use std::time::Duration;

const BANNER: &str = "Native profiling workload suite";
const PREVIEW_CHARS: usize = 20;

/// Runs phases against a sizing configuration
pub struct Runner {
    config: WorkloadConfig,
    filter: PhaseFilter,
    seed: u64,
}

impl Runner {
    /// `seed` overrides the config seed; with neither a random seed is drawn
    pub fn new(config: WorkloadConfig, filter: PhaseFilter, seed: Option<u64>) -> Self {
        let seed = seed.or(config.seed).unwrap_or_else(rand::random);
        Self {
            config,
            filter,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Run every selected phase, writing progress to `out`
    pub fn run(&self, out: &mut dyn Write) -> Result<RunReport> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut report = RunReport::new(self.seed);
        let phases = self.filter.phases();

        tracing::info!(seed = self.seed, phases = phases.len(), "starting run");

        writeln!(out, "{}", BANNER)?;
        writeln!(out, "{}", "=".repeat(BANNER.len()))?;
        writeln!(out, "Seed: {}", self.seed)?;
        writeln!(out)?;

        for phase in phases {
            let outcome = self.run_phase(phase, &mut rng, out)?;
            report.record(outcome);
        }

        let totals = report.totals();
        writeln!(out, "All workloads completed!")?;
        writeln!(out, "Total time: {:.2} seconds", totals.wall.as_secs_f64())?;

        tracing::info!(
            wall_secs = totals.wall.as_secs_f64(),
            cpu_secs = totals.cpu.as_secs_f64(),
            peak_rss_kb = totals.peak_rss_kb,
            "run finished"
        );
        Ok(report)
    }

    /// Run one phase with its header, progress and timing lines
    pub fn run_phase(
        &self,
        phase: Phase,
        rng: &mut StdRng,
        out: &mut dyn Write,
    ) -> Result<PhaseOutcome> {
        writeln!(out, "{}. {}...", phase.ordinal(), self.header(phase))?;
        tracing::info!(phase = %phase, ordinal = phase.ordinal(), "phase started");

        let (detail, measurement) = PhaseTimer::measure(|| match phase {
            Phase::Matrix => self.matrix(rng, out),
            Phase::Primes => self.primes(out),
            Phase::Fibonacci => self.fibonacci(out),
            Phase::Sort => self.sort(rng, out),
            Phase::Strings => self.strings(out),
            Phase::Memory => self.memory(rng, out),
            Phase::Mandelbrot => self.mandelbrot(out),
            Phase::Nbody => self.nbody(rng, out),
            Phase::Spin => self.spin(out),
            Phase::Mixed => self.mixed(out),
        });
        let detail = detail?;

        writeln!(out, "   Time: {:.2} seconds", measurement.wall.as_secs_f64())?;
        writeln!(out)?;

        tracing::info!(
            phase = %phase,
            wall_secs = measurement.wall.as_secs_f64(),
            cpu_secs = measurement.cpu.as_secs_f64(),
            max_rss_kb = measurement.max_rss_kb,
            "phase finished"
        );

        Ok(PhaseOutcome {
            phase,
            measurement,
            detail,
        })
    }

    fn header(&self, phase: Phase) -> String {
        let c = &self.config;
        match phase {
            Phase::Matrix => format!("Matrix multiplication ({0}x{0})", c.matrix.size),
            Phase::Primes => format!("Calculating primes up to {}", c.primes.limit),
            Phase::Fibonacci => "Calculating Fibonacci numbers (recursive)".to_string(),
            Phase::Sort => format!("Bubble sort ({} elements)", c.sort.size),
            Phase::Strings => format!("String manipulation ({} iterations)", c.strings.iterations),
            Phase::Memory => format!(
                "Memory allocation stress test ({} blocks)",
                c.memory.iterations
            ),
            Phase::Mandelbrot => format!(
                "Computing Mandelbrot set ({}x{})",
                c.mandelbrot.width, c.mandelbrot.height
            ),
            Phase::Nbody => format!(
                "N-body simulation ({} bodies, {} steps)",
                c.nbody.bodies, c.nbody.steps
            ),
            Phase::Spin => format!(
                "Accumulation loop ({} rounds, {} ms pauses)",
                c.spin.rounds, c.spin.pause_ms
            ),
            Phase::Mixed => format!(
                "Mixed kernels (at least {} ms)",
                c.mixed.min_duration_ms
            ),
        }
    }

    fn matrix(&self, rng: &mut StdRng, out: &mut dyn Write) -> Result<PhaseDetail> {
        let cfg = &self.config.matrix;
        tracing::debug!(size = cfg.size, iterations = cfg.iterations, "allocating matrices");

        let a = matrix::Matrix::random(cfg.size, rng);
        let b = matrix::Matrix::random(cfg.size, rng);
        let mut c = matrix::Matrix::random(cfg.size, rng);

        for i in 0..cfg.iterations {
            matrix::multiply_into(black_box(&a), black_box(&b), &mut c)?;
            writeln!(out, "   Iteration {}/{} completed", i + 1, cfg.iterations)?;
        }

        Ok(PhaseDetail::Matrix {
            size: cfg.size,
            iterations: cfg.iterations,
            trace: black_box(c.trace()),
        })
    }

    fn primes(&self, out: &mut dyn Write) -> Result<PhaseDetail> {
        let cfg = &self.config.primes;
        let mut count = 0;
        let mut largest = None;

        for pass in 0..cfg.passes {
            let found = black_box(primes::sieve(black_box(cfg.limit)));
            if pass == 0 {
                writeln!(out, "   Found {} primes", found.len())?;
                count = found.len();
                largest = found.last().copied();
            }
        }

        Ok(PhaseDetail::Primes {
            limit: cfg.limit,
            passes: cfg.passes,
            count,
            largest,
        })
    }

    fn fibonacci(&self, out: &mut dyn Write) -> Result<PhaseDetail> {
        let cfg = &self.config.fibonacci;
        let mut values = Vec::new();

        for n in cfg.start..=cfg.end {
            let value = fibonacci::fibonacci_recursive(black_box(n));
            writeln!(out, "   fib({}) = {}", n, value)?;
            values.push(FibonacciValue { n, value });
        }

        Ok(PhaseDetail::Fibonacci { values })
    }

    fn sort(&self, rng: &mut StdRng, out: &mut dyn Write) -> Result<PhaseDetail> {
        let size = self.config.sort.size;
        let mut data = sort::random_input(size, rng);

        sort::bubble_sort(black_box(&mut data));

        let sorted = sort::is_sorted(&data);
        if sorted {
            writeln!(out, "   Sorted {} elements", data.len())?;
        } else {
            tracing::warn!(size, "bubble sort left the input out of order");
            writeln!(out, "   WARNING: output is not sorted")?;
        }

        Ok(PhaseDetail::Sort { size, sorted })
    }

    fn strings(&self, out: &mut dyn Write) -> Result<PhaseDetail> {
        let cfg = &self.config.strings;
        let result = strings::transform(black_box(&cfg.input), cfg.iterations);
        let preview = strings::preview(&result, PREVIEW_CHARS).to_string();

        writeln!(out, "   Result: {}...", preview)?;

        Ok(PhaseDetail::Strings {
            iterations: cfg.iterations,
            preview,
        })
    }

    fn memory(&self, rng: &mut StdRng, out: &mut dyn Write) -> Result<PhaseDetail> {
        let cfg = &self.config.memory;
        let max_live_bytes = cfg.max_live_mb.saturating_mul(1024 * 1024);
        tracing::debug!(
            iterations = cfg.iterations,
            min_block_kb = cfg.min_block_kb,
            max_block_kb = cfg.max_block_kb,
            max_live_bytes,
            "starting allocation churn"
        );

        let report = memory::stress(
            cfg.iterations,
            cfg.min_block_kb..=cfg.max_block_kb,
            max_live_bytes,
            rng,
        );

        writeln!(
            out,
            "   Allocated {} blocks ({:.1} MiB total, {:.1} MiB peak live)",
            report.blocks,
            mib(report.total_bytes),
            mib(report.peak_live_bytes)
        )?;

        Ok(PhaseDetail::Memory(report))
    }

    fn mandelbrot(&self, out: &mut dyn Write) -> Result<PhaseDetail> {
        let cfg = &self.config.mandelbrot;
        let mut summary = mandelbrot::MandelbrotSummary::default();

        for pass in 0..cfg.passes {
            summary = black_box(mandelbrot::render(cfg.width, cfg.height, cfg.max_iter));
            writeln!(out, "   Pass {}/{} completed", pass + 1, cfg.passes)?;
        }

        Ok(PhaseDetail::Mandelbrot(summary))
    }

    fn nbody(&self, rng: &mut StdRng, out: &mut dyn Write) -> Result<PhaseDetail> {
        let cfg = &self.config.nbody;
        let mut sim = nbody::Simulation::random(cfg.bodies, rng);

        sim.run(cfg.steps, cfg.dt, cfg.gravity);

        let (px, py, pz) = black_box(sim.momentum());
        writeln!(
            out,
            "   Simulated {} steps, momentum ({:.3}, {:.3}, {:.3})",
            cfg.steps, px, py, pz
        )?;

        Ok(PhaseDetail::Nbody {
            bodies: cfg.bodies,
            steps: cfg.steps,
            momentum: [px, py, pz],
        })
    }

    fn spin(&self, out: &mut dyn Write) -> Result<PhaseDetail> {
        let cfg = &self.config.spin;
        let mut last_sum = 0.0;

        for round in 0..cfg.rounds {
            last_sum = spin::accumulate(black_box(cfg.loop_count));
            writeln!(out, "   Round {}/{}: sum = {:.6}", round + 1, cfg.rounds, last_sum)?;
            if cfg.pause_ms > 0 {
                thread::sleep(Duration::from_millis(cfg.pause_ms));
            }
        }

        Ok(PhaseDetail::Spin {
            rounds: cfg.rounds,
            last_sum,
        })
    }

    fn mixed(&self, out: &mut dyn Write) -> Result<PhaseDetail> {
        let min = Duration::from_millis(self.config.mixed.min_duration_ms);
        let report = mixed::run_for(min);

        writeln!(
            out,
            "   Completed {} iterations in {:.3} seconds",
            report.iterations,
            report.elapsed.as_secs_f64()
        )?;

        Ok(PhaseDetail::Mixed {
            iterations: report.iterations,
            checksum: report.checksum,
        })
    }
}

fn mib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
