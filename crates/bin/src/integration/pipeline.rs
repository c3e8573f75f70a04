//! Optimization pipeline for the CLI.
//!
//! Loads a price table, resolves options from an optional JSON file plus
//! command-line overrides, and runs the optimizer or the moment estimator.

use chrono::NaiveDate;
use frontier_data::{DataError, PriceTable};
use frontier_optimizer::{MeanVarianceOptimizer, OptimizationOptions, OptimizationResult};
use frontier_risk::{Moments, RiskError, simple_returns};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Command-line overrides applied on top of the options file.
#[derive(Debug, Clone, Default)]
pub(crate) struct OptionOverrides {
    pub(crate) options_file: Option<PathBuf>,
    pub(crate) tolerance: Option<f64>,
    pub(crate) max_iterations: Option<usize>,
    pub(crate) allow_short: bool,
    pub(crate) no_sum_to_one: bool,
}

/// Load a price table and log its shape.
pub(crate) fn load_prices(path: &Path) -> Result<PriceTable, DataError> {
    let table = PriceTable::from_path(path)?;
    info!(
        path = %path.display(),
        assets = table.n_assets(),
        periods = table.n_periods(),
        "Loaded prices"
    );
    if table.skipped_rows > 0 {
        warn!(
            skipped = table.skipped_rows,
            "Skipped malformed rows with the wrong number of columns"
        );
    }
    Ok(table)
}

/// Resolve options: defaults, then the options file, then flags.
pub(crate) fn resolve_options(
    overrides: &OptionOverrides,
) -> Result<OptimizationOptions, frontier_optimizer::OptimizationError> {
    let mut options = match &overrides.options_file {
        Some(path) => {
            debug!(path = %path.display(), "Reading options file");
            OptimizationOptions::from_json_file(path)?
        }
        None => OptimizationOptions::default(),
    };

    if let Some(tolerance) = overrides.tolerance {
        options = options.with_tolerance(tolerance);
    }
    if let Some(max_iterations) = overrides.max_iterations {
        options = options.with_max_iterations(max_iterations);
    }
    if overrides.allow_short {
        options = options.with_non_negativity(false);
    }
    if overrides.no_sum_to_one {
        options = options.with_sum_to_one(false);
    }

    options.validate()?;
    Ok(options)
}

/// Optimize the loaded prices for a target return.
pub(crate) fn run_optimization(
    table: &PriceTable,
    target_return: f64,
    options: OptimizationOptions,
) -> Result<OptimizationResult, frontier_optimizer::OptimizationError> {
    let optimizer = MeanVarianceOptimizer::new(options)?;
    optimizer.optimize(&table.prices, target_return)
}

/// Estimate mean returns and covariance for the loaded prices.
pub(crate) fn compute_moments(table: &PriceTable) -> Result<Moments, RiskError> {
    let returns = simple_returns(&table.prices)?;
    Moments::estimate(&returns)
}

/// Date of the last retained period, if the label is an ISO date.
pub(crate) fn last_period_date(table: &PriceTable) -> Option<NaiveDate> {
    table
        .dates
        .last()
        .and_then(|label| NaiveDate::parse_from_str(label, "%Y-%m-%d").ok())
}
