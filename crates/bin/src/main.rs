//! Frontier CLI binary.
//!
//! Provides command-line interface for the Frontier portfolio optimizer.

mod integration;

use clap::{Parser, Subcommand};
use frontier_output::generate_portfolio_summary;
use integration::pipeline::{
    OptionOverrides, compute_moments, load_prices, resolve_options, run_optimization,
};
use integration::render::{AllocationFormat, moments_json, moments_table, render_allocation};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Tolerance used when reporting whether the final weights meet the constraints.
const REPORT_TOLERANCE: f64 = 1e-6;

#[derive(Parser)]
#[command(name = "frontier")]
#[command(about = "Frontier: minimum-variance portfolios for a target return", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute minimum-variance weights for a target return
    Optimize {
        /// Price CSV (first column period label, one column per asset)
        prices: PathBuf,

        /// Target expected return per period (e.g. 0.01 for 1%)
        #[arg(long, allow_hyphen_values = true)]
        target: f64,

        /// JSON file with optimization options
        #[arg(long)]
        options: Option<PathBuf>,

        /// Numerical tolerance
        #[arg(long)]
        tolerance: Option<f64>,

        /// Iteration cap (reserved for iterative solvers)
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Keep negative weights from the KKT solution
        #[arg(long)]
        allow_short: bool,

        /// Do not renormalise weights after clamping
        #[arg(long)]
        no_sum_to_one: bool,

        /// Portfolio name used in the output
        #[arg(long)]
        name: Option<String>,

        /// Output format (text, csv, json or pretty-json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show mean returns, volatilities and the covariance matrix
    Moments {
        /// Price CSV (first column period label, one column per asset)
        prices: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Optimize {
            prices,
            target,
            options,
            tolerance,
            max_iterations,
            allow_short,
            no_sum_to_one,
            name,
            format,
            output,
        } => {
            let overrides = OptionOverrides {
                options_file: options,
                tolerance,
                max_iterations,
                allow_short,
                no_sum_to_one,
            };
            optimize(&prices, target, &overrides, name, &format, output.as_deref())?;
        }
        Commands::Moments { prices, format } => {
            moments(&prices, &format)?;
        }
    }

    Ok(())
}

fn optimize(
    path: &Path,
    target: f64,
    overrides: &OptionOverrides,
    name: Option<String>,
    format: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: AllocationFormat = format.parse()?;
    let table = load_prices(path)?;
    let options = resolve_options(overrides)?;
    debug!(?options, "Resolved options");

    let result = run_optimization(&table, target, options)?;

    let name = name.unwrap_or_else(|| {
        path.file_stem()
            .map_or_else(|| "portfolio".to_string(), |s| s.to_string_lossy().into_owned())
    });
    let summary = generate_portfolio_summary(name, &table.asset_names, &result, REPORT_TOLERANCE)?;

    let rendered = render_allocation(
        path.display().to_string(),
        &table,
        &summary,
        result.diagnostics,
        format,
    )?;

    emit(&rendered, output)
}

fn moments(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_prices(path)?;
    let moments = compute_moments(&table)?;

    match format {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&moments_json(&table.asset_names, &moments))?
        ),
        "text" => print!("{}", moments_table(&table.asset_names, &moments)),
        other => return Err(format!("Unknown format: {} (expected text or json)", other).into()),
    }

    Ok(())
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
