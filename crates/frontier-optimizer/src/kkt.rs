//! KKT system assembly
//!
//! Minimising wᵀΣw subject to μᵀw = t and 1ᵀw = 1 has first-order conditions
//! that form one symmetric linear system of size N + 2:
//!
//! ```text
//! | Σ   μ  1 | | w  |   | 0 |
//! | μᵀ  0  0 | | λ₁ | = | t |
//! | 1ᵀ  0  0 | | λ₂ |   | 1 |
//! ```
//!
//! Row/column N carries the return-target constraint and row/column N + 1
//! the budget constraint.

use crate::error::{OptimizationError, Result};
use frontier_risk::{LuDecomposition, PIVOT_TOLERANCE};
use ndarray::{Array1, Array2, s};

/// Bordered covariance matrix and right-hand side for a target return
#[derive(Debug, Clone, PartialEq)]
pub struct KktSystem {
    matrix: Array2<f64>,
    rhs: Array1<f64>,
    n_assets: usize,
}

/// Solution of the KKT system split into weights and multipliers
#[derive(Debug, Clone, PartialEq)]
pub struct KktSolution {
    /// Raw asset weights (first N entries of the solution)
    pub weights: Array1<f64>,
    /// Multiplier of the return-target constraint
    pub return_multiplier: f64,
    /// Multiplier of the budget (sum-to-one) constraint
    pub budget_multiplier: f64,
    /// Smallest pivot magnitude of the LU decomposition
    pub min_pivot: f64,
}

impl KktSolution {
    /// Whether the solver fell back on its degeneracy policy
    pub fn is_degenerate(&self) -> bool {
        self.min_pivot < PIVOT_TOLERANCE
    }
}

impl KktSystem {
    /// Assemble the system from moments and a target return
    ///
    /// # Arguments
    /// * `covariance` - Asset covariance matrix (N x N)
    /// * `mean` - Mean return per asset (length N)
    /// * `target_return` - Required portfolio expected return
    ///
    /// # Errors
    /// Returns [`OptimizationError::DimensionMismatch`] if the covariance is
    /// not N x N for a mean vector of length N.
    pub fn build(covariance: &Array2<f64>, mean: &Array1<f64>, target_return: f64) -> Result<Self> {
        let n = mean.len();
        let (rows, cols) = covariance.dim();
        if rows != n {
            return Err(OptimizationError::DimensionMismatch {
                expected: n,
                actual: rows,
            });
        }
        if cols != n {
            return Err(OptimizationError::DimensionMismatch {
                expected: n,
                actual: cols,
            });
        }

        let size = n + 2;
        let mut matrix = Array2::<f64>::zeros((size, size));
        matrix.slice_mut(s![..n, ..n]).assign(covariance);

        for i in 0..n {
            matrix[[i, n]] = mean[i];
            matrix[[n, i]] = mean[i];
            matrix[[i, n + 1]] = 1.0;
            matrix[[n + 1, i]] = 1.0;
        }

        let mut rhs = Array1::<f64>::zeros(size);
        rhs[n] = target_return;
        rhs[n + 1] = 1.0;

        Ok(Self {
            matrix,
            rhs,
            n_assets: n,
        })
    }

    /// The (N + 2) x (N + 2) KKT matrix
    pub const fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// The right-hand side vector
    pub const fn rhs(&self) -> &Array1<f64> {
        &self.rhs
    }

    /// Number of assets N
    pub const fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Solve the system by LU decomposition
    ///
    /// # Errors
    /// Only fails on internal dimension errors; near-singular systems are
    /// solved under the degeneracy policy and flagged via `min_pivot`.
    pub fn solve(&self) -> Result<KktSolution> {
        let n = self.n_assets;
        let lu = LuDecomposition::new(&self.matrix)?;
        let x = lu.solve(&self.rhs)?;

        Ok(KktSolution {
            weights: x.slice(s![..n]).to_owned(),
            return_multiplier: x[n],
            budget_multiplier: x[n + 1],
            min_pivot: lu.min_pivot(),
        })
    }
}
