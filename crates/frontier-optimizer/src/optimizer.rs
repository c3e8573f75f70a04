//! Mean-variance optimizer
//!
//! Runs the full pipeline for one request:
//!
//! prices → returns → (mean, covariance) → KKT system → raw weights
//!        → repaired weights → metrics
//!
//! Every stage allocates its own arrays and nothing is kept between calls, so
//! one optimizer can serve concurrent requests through a shared reference.

use crate::error::Result;
use crate::kkt::KktSystem;
use crate::metrics::PortfolioMetrics;
use crate::options::OptimizationOptions;
use crate::repair::repair_weights;
use frontier_risk::{Moments, price_matrix_from_rows, simple_returns};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How the solve went, beyond the weights themselves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveDiagnostics {
    /// Smallest pivot magnitude of the KKT decomposition
    pub min_pivot: f64,
    /// The solver replaced at least one near-zero pivot with zero
    pub degenerate: bool,
    /// Lagrange multiplier of the return-target constraint
    pub return_multiplier: f64,
    /// Lagrange multiplier of the budget constraint
    pub budget_multiplier: f64,
    /// Negative weights were clamped
    pub clamped: bool,
    /// Clamped weights were rescaled to sum to one
    pub renormalized: bool,
}

/// Which constraints the final weights satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintCheck {
    /// Weights sum to one within tolerance
    pub sums_to_one: bool,
    /// No weight is below -tolerance
    pub non_negative: bool,
    /// Expected return is within tolerance of the target
    pub meets_target: bool,
}

impl ConstraintCheck {
    /// All constraints hold
    pub const fn all_met(&self) -> bool {
        self.sums_to_one && self.non_negative && self.meets_target
    }
}

/// Output of one optimization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Final portfolio weights, one per asset
    pub weights: Array1<f64>,
    /// Expected return and volatility of the final weights
    pub metrics: PortfolioMetrics,
    /// Target return requested
    pub target_return: f64,
    /// Solver and repair diagnostics
    pub diagnostics: SolveDiagnostics,
}

impl OptimizationResult {
    /// Number of assets
    pub fn n_assets(&self) -> usize {
        self.weights.len()
    }

    /// Check the final weights against the problem's constraints
    pub fn check_constraints(&self, tolerance: f64) -> ConstraintCheck {
        ConstraintCheck {
            sums_to_one: (self.weights.sum() - 1.0).abs() <= tolerance,
            non_negative: self.weights.iter().all(|&w| w >= -tolerance),
            meets_target: (self.metrics.expected_return - self.target_return).abs() <= tolerance,
        }
    }
}

/// Minimum-variance optimizer for a target expected return
#[derive(Debug, Clone, Default)]
pub struct MeanVarianceOptimizer {
    options: OptimizationOptions,
}

impl MeanVarianceOptimizer {
    /// Create an optimizer with the given options
    ///
    /// # Errors
    /// Returns an error if the options fail validation.
    pub fn new(options: OptimizationOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Options in effect
    pub const fn options(&self) -> &OptimizationOptions {
        &self.options
    }

    /// Optimize from a price matrix (rows = periods, columns = assets)
    ///
    /// # Errors
    /// * insufficient data when fewer than two price periods are given
    /// * degenerate sample when only one return period results
    /// * dimension mismatch on inconsistent intermediate shapes
    pub fn optimize(&self, prices: &Array2<f64>, target_return: f64) -> Result<OptimizationResult> {
        debug!(
            periods = prices.nrows(),
            assets = prices.ncols(),
            target_return,
            tolerance = self.options.tolerance,
            max_iterations = self.options.max_iterations,
            enforce_non_negativity = self.options.enforce_non_negativity,
            enforce_sum_to_one = self.options.enforce_sum_to_one,
            "Optimizing portfolio"
        );

        let returns = simple_returns(prices)?;
        let moments = Moments::estimate(&returns)?;
        self.optimize_moments(&moments, target_return)
    }

    /// Optimize from row-major price rows
    ///
    /// # Errors
    /// As [`Self::optimize`], plus a dimension mismatch for ragged rows.
    pub fn optimize_rows(&self, rows: &[Vec<f64>], target_return: f64) -> Result<OptimizationResult> {
        let prices = price_matrix_from_rows(rows)?;
        self.optimize(&prices, target_return)
    }

    /// Optimize from already estimated moments
    ///
    /// # Errors
    /// Returns a dimension mismatch if mean and covariance disagree.
    pub fn optimize_moments(
        &self,
        moments: &Moments,
        target_return: f64,
    ) -> Result<OptimizationResult> {
        let system = KktSystem::build(&moments.covariance, &moments.mean, target_return)?;
        let solution = system.solve()?;

        if solution.is_degenerate() {
            warn!(
                min_pivot = solution.min_pivot,
                "KKT system is numerically singular, solution may be unreliable"
            );
        }

        let repaired = repair_weights(&solution.weights, &self.options);
        let metrics = PortfolioMetrics::compute(&repaired.weights, &moments.mean, &moments.covariance)?;

        debug!(
            expected_return = metrics.expected_return,
            volatility = metrics.volatility,
            "Optimization complete"
        );

        Ok(OptimizationResult {
            weights: repaired.weights,
            metrics,
            target_return,
            diagnostics: SolveDiagnostics {
                min_pivot: solution.min_pivot,
                degenerate: solution.is_degenerate(),
                return_multiplier: solution.return_multiplier,
                budget_multiplier: solution.budget_multiplier,
                clamped: repaired.clamped,
                renormalized: repaired.renormalized,
            },
        })
    }
}

/// Compute minimum-variance weights for a target return
///
/// # Arguments
/// * `prices` - Price rows, one per period, each with one price per asset
/// * `target_return` - Required expected per-period portfolio return
/// * `options` - Optimization options
///
/// # Errors
/// Returns an error for invalid options, fewer than two price periods, fewer
/// than two return periods, or inconsistent row lengths.
pub fn optimize_portfolio(
    prices: &[Vec<f64>],
    target_return: f64,
    options: &OptimizationOptions,
) -> Result<OptimizationResult> {
    MeanVarianceOptimizer::new(options.clone())?.optimize_rows(prices, target_return)
}
