//! Primitive Sweep CLI - Motion Primitive Enumerator
//!
//! A command-line tool that enumerates motion primitives over a grid of
//! boundary velocities and displacements, or builds a single primitive.

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::Context};
use motion_primitive::{
    Outcome, PrimitiveBuilder, PrimitiveConfig, PrimitiveRequest, TracingObserver,
};
use motion_primitive_sweep::{
    ReportFormat, SweepConfig, SweepReport, report::render_primitives, run_sweep,
    run_sweep_parallel,
};
use std::{env, path::PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "primitive-sweep",
    about = "Motion Primitive Enumerator",
    long_about = "Generate minimum-duration, velocity-bounded cubic motion primitives for a robot arm"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate primitives over a grid of velocities and displacements
    Grid {
        /// Sweep configuration file (json, yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file for the report
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
        /// Number of sweep workers
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,
    },
    /// Build a single primitive
    Single {
        /// Displacement of each joint, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        displacement: Vec<f64>,
        /// Start velocity of each joint, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        start: Vec<f64>,
        /// End velocity of each joint, comma separated
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        end: Vec<f64>,
        /// Velocity limit of each joint, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        limit: Vec<f64>,
    },
}

#[tokio::main]
#[async_backtrace::framed]
async fn main() {
    // Enable backtraces by default
    if env::var("RUST_BACKTRACE").is_err() {
        unsafe {
            env::set_var("RUST_BACKTRACE", "1");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Install color-eyre with enhanced configuration
    color_eyre::config::HookBuilder::default()
        .capture_span_trace_by_default(true)
        .display_location_section(true)
        .display_env_section(false)
        .install()
        .expect("Failed to install color-eyre");

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grid {
            config,
            output,
            format,
            jobs,
        } => sweep_grid(config, output, format, jobs).await,
        Commands::Single {
            displacement,
            start,
            end,
            limit,
        } => single_primitive(&displacement, &start, &end, &limit),
    };

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        std::process::exit(1);
    }
}

#[async_backtrace::framed]
async fn sweep_grid(
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    format: String,
    jobs: usize,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            info!("Loading sweep configuration from {}", path.display());
            SweepConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load sweep config {}", path.display()))?
        }
        None => SweepConfig::default(),
    };
    let report_format = parse_format(&format)?;

    let result = if jobs > 1 {
        run_sweep_parallel(&config.grid, &config.primitive, jobs).await
    } else {
        run_sweep(&config.grid, &config.primitive, &mut TracingObserver)
    }
    .wrap_err("Sweep failed")?;

    let report = SweepReport::new(config, result);

    if let Some(output_path) = output_path {
        report.save_to_file(&output_path, report_format)?;
        println!("Report saved to: {}", output_path.display());
    } else {
        print!("{}", report.render(report_format)?);
    }

    // Print summary to stderr so it doesn't interfere with stdout output
    print_sweep_summary(&report);

    Ok(())
}

fn single_primitive(displacement: &[f64], start: &[f64], end: &[f64], limit: &[f64]) -> Result<()> {
    let request = PrimitiveRequest::new(displacement, start, end, limit)
        .wrap_err("Invalid primitive request")?;

    match PrimitiveBuilder::new(PrimitiveConfig::default())
        .build_observed(&request, &mut TracingObserver)
    {
        Outcome::Accepted(primitive) => print!("{}", render_primitives(&[primitive])),
        Outcome::Declined(reason) => eprintln!("Primitive declined: {}", reason),
    }

    Ok(())
}

fn parse_format(format: &str) -> Result<ReportFormat> {
    ReportFormat::from_extension(format).ok_or_else(|| {
        color_eyre::eyre::eyre!(
            "Unsupported format '{}'. Supported formats: text, json, yaml",
            format
        )
    })
}

fn print_sweep_summary(report: &SweepReport) {
    let summary = &report.summary;
    eprintln!();
    eprintln!("=== Sweep Summary ===");
    eprintln!("Joints: {}", report.dof);
    eprintln!("Candidates: {}", summary.candidates);
    eprintln!("Accepted: {}", summary.accepted);
    eprintln!("Declined: {}", summary.declined());
    eprintln!("  bracket lost: {}", summary.bracket_lost);
    eprintln!("  infinite acceleration: {}", summary.infinite_acceleration);
    eprintln!("  duration too short: {}", summary.duration_too_short);
    eprintln!();
}
