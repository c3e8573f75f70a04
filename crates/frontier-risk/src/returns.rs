//! Simple return calculation
//!
//! Converts a price matrix (rows = periods, columns = assets) into the matrix
//! of period-over-period simple returns:
//!
//! r(t, a) = (p(t, a) - p(t-1, a)) / p(t-1, a)
//!
//! A prior price whose magnitude is below [`MIN_PRICE_MAGNITUDE`] yields a
//! return of zero rather than NaN or infinity.

use crate::error::{Result, RiskError};
use ndarray::Array2;
use tracing::debug;

/// Prior prices with an absolute value below this threshold produce a zero return.
pub const MIN_PRICE_MAGNITUDE: f64 = 1e-9;

/// Build a price matrix from row-major price rows.
///
/// Every row must have the same, non-zero length.
///
/// # Errors
/// * [`RiskError::NoAssets`] if the first row is empty
/// * [`RiskError::DimensionMismatch`] if a later row has a different length
pub fn price_matrix_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let n_periods = rows.len();
    let n_assets = rows.first().map_or(0, Vec::len);

    if n_periods > 0 && n_assets == 0 {
        return Err(RiskError::NoAssets);
    }

    let mut prices = Array2::<f64>::zeros((n_periods, n_assets));
    for (t, row) in rows.iter().enumerate() {
        if row.len() != n_assets {
            return Err(RiskError::DimensionMismatch {
                expected: n_assets,
                actual: row.len(),
            });
        }
        for (a, &price) in row.iter().enumerate() {
            prices[[t, a]] = price;
        }
    }

    Ok(prices)
}

/// Compute simple returns from a price matrix.
///
/// # Arguments
/// * `prices` - Matrix where each row is a period and each column is an asset
///
/// # Returns
/// * Return matrix with one fewer row than `prices`
///
/// # Errors
/// * [`RiskError::InsufficientData`] with fewer than two price periods
/// * [`RiskError::NoAssets`] when the matrix has no columns
pub fn simple_returns(prices: &Array2<f64>) -> Result<Array2<f64>> {
    let (n_periods, n_assets) = prices.dim();

    if n_periods < 2 {
        return Err(RiskError::InsufficientData {
            required: 2,
            actual: n_periods,
        });
    }
    if n_assets == 0 {
        return Err(RiskError::NoAssets);
    }

    let mut returns = Array2::<f64>::zeros((n_periods - 1, n_assets));
    let mut guarded = 0usize;
    for t in 1..n_periods {
        for a in 0..n_assets {
            let prev = prices[[t - 1, a]];
            let curr = prices[[t, a]];
            returns[[t - 1, a]] = if prev.abs() < MIN_PRICE_MAGNITUDE {
                guarded += 1;
                0.0
            } else {
                (curr - prev) / prev
            };
        }
    }

    if guarded > 0 {
        debug!(guarded, "Zero returns substituted for near-zero prior prices");
    }

    Ok(returns)
}
