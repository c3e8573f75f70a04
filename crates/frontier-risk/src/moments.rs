//! Sample moment estimation
//!
//! Estimates the first two moments of asset returns:
//! - the arithmetic mean return of each asset
//! - the unbiased sample covariance matrix, using the (R - 1) divisor
//!
//! The covariance is computed on the lower triangle only and mirrored, so the
//! result is exactly symmetric.

use crate::error::{Result, RiskError};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Mean return vector and covariance matrix of a return sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// Mean return per asset (length N)
    pub mean: Array1<f64>,
    /// Sample covariance matrix (N x N)
    pub covariance: Array2<f64>,
}

impl Moments {
    /// Estimate mean returns and sample covariance from a return matrix
    ///
    /// # Arguments
    /// * `returns` - Matrix where each row is a period and each column is an asset
    ///
    /// # Errors
    /// * [`RiskError::DegenerateSample`] with fewer than two return periods
    pub fn estimate(returns: &Array2<f64>) -> Result<Self> {
        let mean = mean_returns(returns)?;
        let covariance = sample_covariance(returns, &mean)?;
        Ok(Self { mean, covariance })
    }

    /// Number of assets
    pub fn n_assets(&self) -> usize {
        self.mean.len()
    }

    /// Per-asset volatility (square root of the covariance diagonal)
    pub fn volatilities(&self) -> Array1<f64> {
        self.covariance.diag().mapv(|v| v.max(0.0).sqrt())
    }
}

/// Arithmetic mean of each column of the return matrix
///
/// # Errors
/// * [`RiskError::InsufficientData`] if the matrix has no rows
pub fn mean_returns(returns: &Array2<f64>) -> Result<Array1<f64>> {
    let (n_periods, n_assets) = returns.dim();
    if n_periods == 0 {
        return Err(RiskError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let mut mean = Array1::<f64>::zeros(n_assets);
    for a in 0..n_assets {
        mean[a] = returns.column(a).sum() / n_periods as f64;
    }

    Ok(mean)
}

/// Unbiased sample covariance matrix
///
/// Cov(i, j) = Σ_t (r_{t,i} - μ_i)(r_{t,j} - μ_j) / (R - 1)
///
/// # Arguments
/// * `returns` - Return matrix (R x N)
/// * `mean` - Mean return per asset (length N)
///
/// # Errors
/// * [`RiskError::DegenerateSample`] when R < 2
/// * [`RiskError::DimensionMismatch`] when `mean` does not have N entries
pub fn sample_covariance(returns: &Array2<f64>, mean: &Array1<f64>) -> Result<Array2<f64>> {
    let (n_periods, n_assets) = returns.dim();

    if mean.len() != n_assets {
        return Err(RiskError::DimensionMismatch {
            expected: n_assets,
            actual: mean.len(),
        });
    }
    if n_periods < 2 {
        return Err(RiskError::DegenerateSample { periods: n_periods });
    }

    let divisor = (n_periods - 1) as f64;
    let mut cov = Array2::<f64>::zeros((n_assets, n_assets));

    for i in 0..n_assets {
        for j in 0..=i {
            let mut sum = 0.0;
            for t in 0..n_periods {
                sum += (returns[[t, i]] - mean[i]) * (returns[[t, j]] - mean[j]);
            }
            let value = sum / divisor;
            cov[[i, j]] = value;
            cov[[j, i]] = value;
        }
    }

    Ok(cov)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mean_returns() {
        let returns = array![[0.1, -0.1], [0.3, 0.1]];
        let mean = mean_returns(&returns).unwrap();
        assert_relative_eq!(mean[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(mean[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_covariance_known_values() {
        // x = [1, 2, 3], y = [2, 4, 6]: var(x) = 1, var(y) = 4, cov = 2
        let returns = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let moments = Moments::estimate(&returns).unwrap();

        assert_relative_eq!(moments.covariance[[0, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(moments.covariance[[1, 1]], 4.0, epsilon = 1e-12);
        assert_relative_eq!(moments.covariance[[0, 1]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(moments.volatilities()[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_covariance_is_exactly_symmetric() {
        let returns = array![
            [0.013, -0.021, 0.007, 0.044],
            [-0.032, 0.018, 0.011, -0.005],
            [0.027, 0.003, -0.019, 0.012],
            [0.001, -0.009, 0.025, -0.031],
        ];
        let moments = Moments::estimate(&returns).unwrap();
        let n = moments.n_assets();

        for i in 0..n {
            for j in 0..n {
                assert_eq!(
                    moments.covariance[[i, j]].to_bits(),
                    moments.covariance[[j, i]].to_bits()
                );
            }
            assert!(moments.covariance[[i, i]] >= 0.0);
        }
    }

    #[test]
    fn test_single_return_period_is_degenerate() {
        let returns = array![[0.1, 0.2, 0.3]];
        assert_eq!(
            Moments::estimate(&returns),
            Err(RiskError::DegenerateSample { periods: 1 })
        );
    }

    #[test]
    fn test_mean_length_mismatch() {
        let returns = array![[0.1, 0.2], [0.3, 0.4]];
        let mean = array![0.2];
        assert_eq!(
            sample_covariance(&returns, &mean),
            Err(RiskError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_empty_returns() {
        let returns = Array2::<f64>::zeros((0, 3));
        assert!(mean_returns(&returns).is_err());
    }
}
