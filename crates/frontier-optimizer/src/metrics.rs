//! Portfolio metrics
//!
//! Expected return wᵀμ and volatility √(wᵀΣw), computed from the final
//! (repaired) weights. The variance is clamped at zero before the square root
//! to absorb floating-point noise.

use crate::error::{OptimizationError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Realised statistics of a weight vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Expected portfolio return wᵀμ
    pub expected_return: f64,
    /// Portfolio variance wᵀΣw, clamped at zero
    pub variance: f64,
    /// Portfolio volatility (standard deviation)
    pub volatility: f64,
}

impl PortfolioMetrics {
    /// Compute metrics for `weights` under the given moments
    ///
    /// # Errors
    /// Returns [`OptimizationError::DimensionMismatch`] if the weights, mean
    /// vector and covariance matrix disagree on the asset count.
    pub fn compute(
        weights: &Array1<f64>,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> Result<Self> {
        let n = weights.len();
        if mean.len() != n {
            return Err(OptimizationError::DimensionMismatch {
                expected: n,
                actual: mean.len(),
            });
        }
        if covariance.dim() != (n, n) {
            return Err(OptimizationError::DimensionMismatch {
                expected: n,
                actual: covariance.nrows(),
            });
        }

        let expected_return = weights.dot(mean);
        let variance = weights.dot(&covariance.dot(weights)).max(0.0);

        Ok(Self {
            expected_return,
            variance,
            volatility: variance.sqrt(),
        })
    }
}
