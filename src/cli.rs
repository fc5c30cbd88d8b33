//! CLI argument parsing for profload

use crate::config::Preset;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Progress and timing lines (default)
    Text,
    /// A single JSON document with every phase result
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "profload")]
#[command(version)]
#[command(about = "Synthetic CPU and memory workloads for exercising profilers", long_about = None)]
pub struct Cli {
    /// Phases to run (e.g., --only matrix,primes or --only cpu,!fibonacci or --only /^m/)
    #[arg(long = "only", value_name = "EXPR")]
    pub only: Option<String>,

    /// Sizing preset (ignored when --config is given)
    #[arg(long = "preset", value_enum, default_value = "full")]
    pub preset: Preset,

    /// TOML file with per-phase sizes
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for generated inputs (overrides the config file seed)
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Show a per-phase summary table on stderr after the run
    #[arg(short = 'c', long = "summary")]
    pub summary: bool,

    /// List available phases and classes, then exit
    #[arg(long = "list")]
    pub list: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
