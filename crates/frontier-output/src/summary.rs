//! Portfolio summary.
//!
//! Combines asset names with an optimization result into an allocation table
//! plus headline statistics, and renders it as ASCII or Markdown.

use crate::palette::asset_color;
use frontier_optimizer::{ConstraintCheck, OptimizationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Volatility at or below this level leaves the Sharpe-style ratio undefined.
const MIN_VOLATILITY: f64 = 1e-12;

/// Errors that can occur while building a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Asset names and weights disagree in length.
    #[error("Asset count mismatch: {names} names for {weights} weights")]
    AssetCountMismatch {
        /// Number of asset names supplied.
        names: usize,
        /// Number of weights in the result.
        weights: usize,
    },
}

/// Weight of a single asset in the optimized portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetAllocation {
    /// Asset name.
    pub asset: String,

    /// Portfolio weight.
    pub weight: f64,

    /// Display colour (hex).
    pub color: String,
}

/// Headline view of an optimized portfolio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    /// Portfolio name.
    pub name: String,

    /// Per-asset allocations in input order.
    pub allocations: Vec<AssetAllocation>,

    /// Requested target return.
    pub target_return: f64,

    /// Expected return of the final weights.
    pub expected_return: f64,

    /// Volatility of the final weights.
    pub volatility: f64,

    /// Expected return per unit of volatility; `None` when volatility is zero.
    pub sharpe_ratio: Option<f64>,

    /// Constraint status of the final weights.
    pub constraints: ConstraintCheck,

    /// The solver hit a near-singular pivot.
    pub degenerate: bool,
}

impl PortfolioSummary {
    /// Whether every constraint holds.
    pub const fn constraints_met(&self) -> bool {
        self.constraints.all_met()
    }

    /// Total portfolio weight.
    pub fn total_weight(&self) -> f64 {
        self.allocations.iter().map(|a| a.weight).sum()
    }

    /// Render as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str(&format!("# Portfolio Allocation: {}\n\n", self.name));
        md.push_str(&format!(
            "- Target return: {:.4}%\n- Expected return: {:.4}%\n- Volatility: {:.4}%\n",
            self.target_return * 100.0,
            self.expected_return * 100.0,
            self.volatility * 100.0
        ));
        md.push_str(&format!("- Sharpe ratio: {}\n", format_ratio(self.sharpe_ratio)));
        md.push_str(&format!(
            "- Constraints met: {}\n\n",
            if self.constraints_met() { "yes" } else { "no" }
        ));

        md.push_str("| Asset | Weight | Color |\n");
        md.push_str("|-------|--------|-------|\n");
        for allocation in &self.allocations {
            md.push_str(&format!(
                "| {} | {:.2}% | {} |\n",
                allocation.asset,
                allocation.weight * 100.0,
                allocation.color
            ));
        }

        md
    }
}

impl fmt::Display for PortfolioSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════════╗")?;
        writeln!(f, "║{:^42}║", format!("PORTFOLIO: {}", self.name))?;
        writeln!(f, "╚══════════════════════════════════════════╝")?;
        writeln!(f)?;
        writeln!(f, "{:<20} {:>12}", "Asset", "Weight")?;
        writeln!(f, "{}", "─".repeat(33))?;
        for allocation in &self.allocations {
            writeln!(
                f,
                "{:<20} {:>11.2}%",
                allocation.asset,
                allocation.weight * 100.0
            )?;
        }
        writeln!(f, "{}", "─".repeat(33))?;
        writeln!(f, "{:<20} {:>11.2}%", "Total", self.total_weight() * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Target return:   {:>10.4}%", self.target_return * 100.0)?;
        writeln!(f, "Expected return: {:>10.4}%", self.expected_return * 100.0)?;
        writeln!(f, "Volatility:      {:>10.4}%", self.volatility * 100.0)?;
        writeln!(f, "Sharpe ratio:    {:>10}", format_ratio(self.sharpe_ratio))?;
        write!(
            f,
            "Constraints:     {}",
            if self.constraints_met() {
                "all met"
            } else {
                "not all met"
            }
        )?;
        if self.degenerate {
            write!(f, "\nWarning: near-singular system, weights may be unreliable")?;
        }
        Ok(())
    }
}

/// Expected return divided by volatility, undefined for zero volatility.
pub fn sharpe_ratio(expected_return: f64, volatility: f64) -> Option<f64> {
    (volatility > MIN_VOLATILITY).then(|| expected_return / volatility)
}

/// Build a summary from asset names and an optimization result.
///
/// # Arguments
///
/// * `name` - Portfolio name
/// * `asset_names` - One name per asset, in the order of the price columns
/// * `result` - Optimization result
/// * `tolerance` - Tolerance used for the constraint check
///
/// # Errors
///
/// Returns [`SummaryError::AssetCountMismatch`] if the number of names differs
/// from the number of weights.
pub fn generate_portfolio_summary(
    name: String,
    asset_names: &[String],
    result: &OptimizationResult,
    tolerance: f64,
) -> Result<PortfolioSummary, SummaryError> {
    if asset_names.len() != result.n_assets() {
        return Err(SummaryError::AssetCountMismatch {
            names: asset_names.len(),
            weights: result.n_assets(),
        });
    }

    let allocations = asset_names
        .iter()
        .zip(result.weights.iter())
        .enumerate()
        .map(|(i, (asset, &weight))| AssetAllocation {
            asset: asset.clone(),
            weight,
            color: asset_color(i).to_string(),
        })
        .collect();

    Ok(PortfolioSummary {
        name,
        allocations,
        target_return: result.target_return,
        expected_return: result.metrics.expected_return,
        volatility: result.metrics.volatility,
        sharpe_ratio: sharpe_ratio(result.metrics.expected_return, result.metrics.volatility),
        constraints: result.check_constraints(tolerance),
        degenerate: result.diagnostics.degenerate,
    })
}

fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"))
}
