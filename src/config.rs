//! Workload sizing
//!
//! Every phase reads its parameters from [`WorkloadConfig`]. Sizes come from
//! a named [`Preset`] or from a TOML file. Sections and keys missing from
//! the file fall back to the `full` preset.
//!
//! # Example profload.toml
//!
//! ```toml
//! seed = 42
//!
//! [matrix]
//! size = 400
//! iterations = 3
//!
//! [fibonacci]
//! start = 30
//! end = 35
//! ```

use crate::workloads::fibonacci::MAX_FIBONACCI_N;
use crate::workloads::nbody::{Body, GRAVITATIONAL_CONSTANT};
use crate::workloads::strings::DEFAULT_INPUT;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::mem::size_of;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Named sizing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// Full-size fixture run, one to two minutes per suite
    #[default]
    Full,
    /// A few seconds per suite, for CI smoke runs
    Quick,
    /// Milliseconds per suite, for tests
    Tiny,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixConfig {
    pub size: usize,
    pub iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrimesConfig {
    pub limit: u32,
    pub passes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FibonacciConfig {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SortConfig {
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StringsConfig {
    pub input: String,
    pub iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemoryConfig {
    pub iterations: usize,
    pub min_block_kb: usize,
    pub max_block_kb: usize,
    pub max_live_mb: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MandelbrotConfig {
    pub width: usize,
    pub height: usize,
    pub max_iter: u32,
    pub passes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NbodyConfig {
    pub bodies: usize,
    pub steps: usize,
    pub dt: f64,
    pub gravity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpinConfig {
    pub rounds: usize,
    pub loop_count: u64,
    pub pause_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixedConfig {
    pub min_duration_ms: u64,
}

/// Sizing for every phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkloadConfig {
    /// RNG seed; a random one is chosen (and logged) when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub matrix: MatrixConfig,
    pub primes: PrimesConfig,
    pub fibonacci: FibonacciConfig,
    pub sort: SortConfig,
    pub strings: StringsConfig,
    pub memory: MemoryConfig,
    pub mandelbrot: MandelbrotConfig,
    pub nbody: NbodyConfig,
    pub spin: SpinConfig,
    pub mixed: MixedConfig,
}

macro_rules! full_default {
    ($ty:ident, $section:ident) => {
        impl Default for $ty {
            fn default() -> Self {
                WorkloadConfig::preset(Preset::Full).$section
            }
        }
    };
}

full_default!(MatrixConfig, matrix);
full_default!(PrimesConfig, primes);
full_default!(FibonacciConfig, fibonacci);
full_default!(SortConfig, sort);
full_default!(StringsConfig, strings);
full_default!(MemoryConfig, memory);
full_default!(MandelbrotConfig, mandelbrot);
full_default!(NbodyConfig, nbody);
full_default!(SpinConfig, spin);
full_default!(MixedConfig, mixed);

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::preset(Preset::Full)
    }
}

impl WorkloadConfig {
    /// Sizing for a named preset
    pub fn preset(preset: Preset) -> Self {
        let full = Self {
            seed: None,
            matrix: MatrixConfig {
                size: 800,
                iterations: 10,
            },
            primes: PrimesConfig {
                limit: 500_000,
                passes: 3,
            },
            fibonacci: FibonacciConfig { start: 35, end: 42 },
            sort: SortConfig { size: 100_000 },
            strings: StringsConfig {
                input: DEFAULT_INPUT.to_string(),
                iterations: 50_000,
            },
            memory: MemoryConfig {
                iterations: 5_000,
                min_block_kb: 1,
                max_block_kb: 2_000,
                max_live_mb: 512,
            },
            mandelbrot: MandelbrotConfig {
                width: 800,
                height: 800,
                max_iter: 256,
                passes: 3,
            },
            nbody: NbodyConfig {
                bodies: 100,
                steps: 1_000,
                dt: 0.01,
                gravity: GRAVITATIONAL_CONSTANT,
            },
            spin: SpinConfig {
                rounds: 5,
                loop_count: 100_000_000,
                pause_ms: 1_000,
            },
            mixed: MixedConfig {
                min_duration_ms: 1_000,
            },
        };

        match preset {
            Preset::Full => full,
            Preset::Quick => Self {
                matrix: MatrixConfig {
                    size: 200,
                    iterations: 2,
                },
                primes: PrimesConfig {
                    limit: 100_000,
                    passes: 2,
                },
                fibonacci: FibonacciConfig { start: 25, end: 30 },
                sort: SortConfig { size: 10_000 },
                strings: StringsConfig {
                    iterations: 5_000,
                    ..full.strings
                },
                memory: MemoryConfig {
                    iterations: 500,
                    max_live_mb: 128,
                    ..full.memory
                },
                mandelbrot: MandelbrotConfig {
                    width: 200,
                    height: 200,
                    max_iter: 128,
                    passes: 1,
                },
                nbody: NbodyConfig {
                    bodies: 50,
                    steps: 100,
                    ..full.nbody
                },
                spin: SpinConfig {
                    rounds: 2,
                    loop_count: 10_000_000,
                    pause_ms: 100,
                },
                mixed: MixedConfig {
                    min_duration_ms: 250,
                },
                ..full
            },
            Preset::Tiny => Self {
                matrix: MatrixConfig {
                    size: 16,
                    iterations: 2,
                },
                primes: PrimesConfig {
                    limit: 1_000,
                    passes: 1,
                },
                fibonacci: FibonacciConfig { start: 10, end: 12 },
                sort: SortConfig { size: 200 },
                strings: StringsConfig {
                    iterations: 100,
                    ..full.strings
                },
                memory: MemoryConfig {
                    iterations: 20,
                    min_block_kb: 1,
                    max_block_kb: 64,
                    max_live_mb: 1,
                },
                mandelbrot: MandelbrotConfig {
                    width: 32,
                    height: 32,
                    max_iter: 32,
                    passes: 1,
                },
                nbody: NbodyConfig {
                    bodies: 8,
                    steps: 10,
                    ..full.nbody
                },
                spin: SpinConfig {
                    rounds: 1,
                    loop_count: 1_000,
                    pause_ms: 0,
                },
                mixed: MixedConfig { min_duration_ms: 0 },
                ..full
            },
        }
    }

    /// Load and validate a TOML sizing file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes that would make a phase meaningless or overflow
    pub fn validate(&self) -> Result<()> {
        non_zero("matrix.size", self.matrix.size as u64)?;
        non_zero("matrix.iterations", self.matrix.iterations as u64)?;
        allocation_fits(
            "matrix.size",
            self.matrix.size,
            self.matrix.size,
            size_of::<f64>(),
        )?;
        non_zero("primes.passes", self.primes.passes as u64)?;
        non_zero("sort.size", self.sort.size as u64)?;
        if i32::try_from(self.sort.size).is_err() {
            return invalid("sort.size", format!("{} exceeds i32::MAX", self.sort.size));
        }

        if self.fibonacci.start > self.fibonacci.end {
            return invalid(
                "fibonacci.start",
                format!(
                    "start {} is greater than end {}",
                    self.fibonacci.start, self.fibonacci.end
                ),
            );
        }
        if self.fibonacci.end > MAX_FIBONACCI_N {
            return invalid(
                "fibonacci.end",
                format!(
                    "{} overflows u64 (maximum {})",
                    self.fibonacci.end, MAX_FIBONACCI_N
                ),
            );
        }

        non_zero("memory.min_block_kb", self.memory.min_block_kb as u64)?;
        if self.memory.min_block_kb > self.memory.max_block_kb {
            return invalid(
                "memory.min_block_kb",
                format!(
                    "{} is greater than max_block_kb {}",
                    self.memory.min_block_kb, self.memory.max_block_kb
                ),
            );
        }
        allocation_fits("memory.max_block_kb", self.memory.max_block_kb, 1024, 1)?;
        non_zero("memory.max_live_mb", self.memory.max_live_mb)?;

        non_zero("mandelbrot.width", self.mandelbrot.width as u64)?;
        non_zero("mandelbrot.height", self.mandelbrot.height as u64)?;
        non_zero("mandelbrot.max_iter", u64::from(self.mandelbrot.max_iter))?;
        non_zero("mandelbrot.passes", self.mandelbrot.passes as u64)?;
        allocation_fits(
            "mandelbrot.width",
            self.mandelbrot.width,
            self.mandelbrot.height,
            size_of::<f64>(),
        )?;

        allocation_fits("nbody.bodies", self.nbody.bodies, 1, size_of::<Body>())?;

        if !(self.nbody.dt.is_finite() && self.nbody.dt > 0.0) {
            return invalid("nbody.dt", format!("{} must be finite and positive", self.nbody.dt));
        }
        if !self.nbody.gravity.is_finite() {
            return invalid("nbody.gravity", format!("{} must be finite", self.nbody.gravity));
        }

        Ok(())
    }
}

fn non_zero(field: &'static str, value: u64) -> Result<()> {
    if value == 0 {
        invalid(field, "must be greater than 0".to_string())
    } else {
        Ok(())
    }
}

/// `rows * cols` elements of `elem_size` bytes must fit in one allocation
fn allocation_fits(field: &'static str, rows: usize, cols: usize, elem_size: usize) -> Result<()> {
    match rows
        .checked_mul(cols)
        .and_then(|n| n.checked_mul(elem_size))
    {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(()),
        _ => invalid(
            field,
            format!("{} x {} elements exceed the addressable size", rows, cols),
        ),
    }
}

fn invalid(field: &'static str, reason: String) -> Result<()> {
    Err(ConfigError::Invalid { field, reason })
}
