use anyhow::{Context, Result};
use clap::Parser;
use profload::cli::{Cli, OutputFormat};
use profload::config::WorkloadConfig;
use profload::filter::PhaseFilter;
use profload::json_output::JsonOutput;
use profload::phase::{Phase, CLASSES};
use profload::runner::Runner;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print the phase catalog for --list
fn print_phase_list() {
    println!("Phases (run in this order):");
    for phase in Phase::ALL {
        let default_marker = if Phase::NATIVE.contains(&phase) {
            ""
        } else {
            " (not in default run)"
        };
        println!(
            "  {:>2}. {:<11} {}{}",
            phase.ordinal(),
            phase.name(),
            phase.description(),
            default_marker
        );
    }
    println!();
    println!("Classes:");
    for class in CLASSES {
        let members = Phase::class_members(class).unwrap_or_default();
        let names: Vec<_> = members.iter().map(|p| p.name()).collect();
        println!("  {:<7} {}", class, names.join(","));
    }
}

/// Resolve sizing from --config or --preset
fn load_config(args: &Cli) -> Result<WorkloadConfig> {
    match &args.config {
        Some(path) => WorkloadConfig::from_file(path)
            .with_context(|| format!("Cannot use config {}", path.display())),
        None => Ok(WorkloadConfig::preset(args.preset)),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    if args.list {
        print_phase_list();
        return Ok(());
    }

    let config = load_config(&args)?;
    let filter = match &args.only {
        Some(expr) => PhaseFilter::from_expr(expr)?,
        None => PhaseFilter::default(),
    };
    if filter.is_empty() {
        anyhow::bail!("Phase selection {:?} excludes every phase", args.only.unwrap_or_default());
    }

    let runner = Runner::new(config, filter, args.seed);

    let report = match args.format {
        OutputFormat::Text => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let report = runner.run(&mut out)?;
            out.flush()?;
            report
        }
        OutputFormat::Json => {
            let report = runner.run(&mut io::sink())?;
            let json = JsonOutput::new(&report, runner.config());
            println!("{}", json.to_json()?);
            report
        }
    };

    if args.summary {
        report.print_summary()?;
    }

    Ok(())
}
