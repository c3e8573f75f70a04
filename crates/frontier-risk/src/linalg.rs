//! Dense linear solver
//!
//! LU decomposition with partial pivoting, followed by forward and backward
//! substitution. At each elimination step the row with the largest-magnitude
//! entry in the current column is swapped into the pivot position.
//!
//! Near-singular systems are not rejected. A pivot (or diagonal of U) whose
//! magnitude is below [`PIVOT_TOLERANCE`] is treated as already eliminated:
//! its elimination factors become zero and the matching unknown is set to
//! zero during back substitution. The smallest pivot magnitude seen is kept
//! so callers can tell a trustworthy solve from a degenerate one.

use crate::error::{Result, RiskError};
use ndarray::{Array1, Array2};
use tracing::trace;

/// Pivots with a magnitude below this threshold are treated as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// In-place LU factorisation `P·A = L·U` of a square matrix
///
/// L (unit lower triangular) and U (upper triangular) share one matrix: the
/// strictly lower part holds L's multipliers and the upper part holds U.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    lu: Array2<f64>,
    permutation: Vec<usize>,
    min_pivot: f64,
}

/// Solution of a linear system together with its pivot diagnostic
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSolution {
    /// Solution vector x
    pub x: Array1<f64>,
    /// Smallest pivot magnitude encountered during decomposition
    pub min_pivot: f64,
}

impl LinearSolution {
    /// Whether the degeneracy policy was invoked for this solve
    pub fn is_degenerate(&self) -> bool {
        self.min_pivot < PIVOT_TOLERANCE
    }
}

impl LuDecomposition {
    /// Factor a square matrix
    ///
    /// # Errors
    /// Returns [`RiskError::DimensionMismatch`] if the matrix is not square.
    pub fn new(matrix: &Array2<f64>) -> Result<Self> {
        let n = matrix.nrows();
        if matrix.ncols() != n {
            return Err(RiskError::DimensionMismatch {
                expected: n,
                actual: matrix.ncols(),
            });
        }

        let mut lu = matrix.clone();
        let mut permutation: Vec<usize> = (0..n).collect();

        for k in 0..n {
            // Find pivot
            let mut pivot_row = k;
            let mut max_val = lu[[k, k]].abs();
            for i in (k + 1)..n {
                if lu[[i, k]].abs() > max_val {
                    max_val = lu[[i, k]].abs();
                    pivot_row = i;
                }
            }

            if pivot_row != k {
                swap_rows(&mut lu, k, pivot_row);
                permutation.swap(k, pivot_row);
            }

            let pivot = lu[[k, k]];
            for i in (k + 1)..n {
                let factor = if pivot.abs() > PIVOT_TOLERANCE {
                    lu[[i, k]] / pivot
                } else {
                    0.0
                };
                lu[[i, k]] = factor;
                for j in (k + 1)..n {
                    lu[[i, j]] -= factor * lu[[k, j]];
                }
            }
        }

        let min_pivot = (0..n)
            .map(|i| lu[[i, i]].abs())
            .fold(f64::INFINITY, f64::min);

        if min_pivot < PIVOT_TOLERANCE {
            trace!(n, min_pivot, "Factorization hit a near-zero pivot");
        }

        Ok(Self {
            lu,
            permutation,
            min_pivot,
        })
    }

    /// Dimension of the factored matrix
    pub fn dim(&self) -> usize {
        self.permutation.len()
    }

    /// Smallest |U[i][i]|, or infinity for an empty matrix
    pub const fn min_pivot(&self) -> f64 {
        self.min_pivot
    }

    /// Whether any pivot fell below [`PIVOT_TOLERANCE`]
    pub fn is_degenerate(&self) -> bool {
        self.min_pivot < PIVOT_TOLERANCE
    }

    /// Row permutation: row `i` of `P·A` is row `permutation()[i]` of `A`
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Unit lower triangular factor L
    pub fn lower(&self) -> Array2<f64> {
        let n = self.dim();
        let mut l = Array2::<f64>::eye(n);
        for i in 0..n {
            for j in 0..i {
                l[[i, j]] = self.lu[[i, j]];
            }
        }
        l
    }

    /// Upper triangular factor U
    pub fn upper(&self) -> Array2<f64> {
        let n = self.dim();
        let mut u = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in i..n {
                u[[i, j]] = self.lu[[i, j]];
            }
        }
        u
    }

    /// Solve `A·x = b` using the stored factors
    ///
    /// # Errors
    /// Returns [`RiskError::DimensionMismatch`] if `b` has the wrong length.
    pub fn solve(&self, b: &Array1<f64>) -> Result<Array1<f64>> {
        let n = self.dim();
        if b.len() != n {
            return Err(RiskError::DimensionMismatch {
                expected: n,
                actual: b.len(),
            });
        }

        // Forward substitution (L·y = P·b)
        let mut y: Array1<f64> = self.permutation.iter().map(|&p| b[p]).collect();
        for i in 0..n {
            let mut sum = y[i];
            for j in 0..i {
                sum -= self.lu[[i, j]] * y[j];
            }
            y[i] = sum;
        }

        // Back substitution (U·x = y)
        let mut x = Array1::<f64>::zeros(n);
        for i in (0..n).rev() {
            let mut sum = y[i];
            for j in (i + 1)..n {
                sum -= self.lu[[i, j]] * x[j];
            }
            let diag = self.lu[[i, i]];
            x[i] = if diag.abs() < PIVOT_TOLERANCE {
                0.0
            } else {
                sum / diag
            };
        }

        Ok(x)
    }
}

/// Solve a dense linear system `A·x = b`
///
/// Never fails on numerical grounds; inspect [`LinearSolution::min_pivot`] to
/// detect near-singular input.
///
/// # Errors
/// Returns [`RiskError::DimensionMismatch`] if `a` is not square or `b` does
/// not match its dimension.
pub fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Result<LinearSolution> {
    let lu = LuDecomposition::new(a)?;
    let x = lu.solve(b)?;
    Ok(LinearSolution {
        x,
        min_pivot: lu.min_pivot(),
    })
}

fn swap_rows(matrix: &mut Array2<f64>, a: usize, b: usize) {
    for j in 0..matrix.ncols() {
        matrix.swap([a, j], [b, j]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_identity_returns_rhs_exactly() {
        let a = Array2::<f64>::eye(4);
        let b = array![1.5, -2.25, 0.0, 1e-7];
        let solution = solve_linear_system(&a, &b).unwrap();

        assert_eq!(solution.x, b);
        assert_eq!(solution.min_pivot, 1.0);
        assert!(!solution.is_degenerate());
    }

    #[test]
    fn test_requires_pivoting() {
        // Zero in the leading position forces a row swap
        let a = array![[0.0, 2.0, 1.0], [1.0, 1.0, 0.0], [3.0, 0.0, 1.0]];
        let b = array![5.0, 3.0, 6.0];
        let solution = solve_linear_system(&a, &b).unwrap();

        let residual = a.dot(&solution.x) - &b;
        for r in residual.iter() {
            assert_abs_diff_eq!(*r, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_factors_reproduce_permuted_matrix() {
        let a = array![[2.0, 1.0, 1.0], [4.0, -6.0, 0.0], [-2.0, 7.0, 2.0]];
        let lu = LuDecomposition::new(&a).unwrap();

        // Largest entry of column 0 is in row 1
        assert_eq!(lu.permutation()[0], 1);

        let product = lu.lower().dot(&lu.upper());
        for (i, &p) in lu.permutation().iter().enumerate() {
            for j in 0..3 {
                assert_abs_diff_eq!(product[[i, j]], a[[p, j]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_singular_matrix_degrades_silently() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![3.0, 6.0];
        let solution = solve_linear_system(&a, &b).unwrap();

        assert!(solution.is_degenerate());
        assert!(solution.x.iter().all(|v| v.is_finite()));
        assert_eq!(solution.x[1], 0.0);
    }

    #[test]
    fn test_non_square_matrix_is_rejected() {
        let a = Array2::<f64>::zeros((2, 3));
        assert!(LuDecomposition::new(&a).is_err());
    }

    #[test]
    fn test_rhs_length_mismatch() {
        let a = Array2::<f64>::eye(3);
        let b = array![1.0, 2.0];
        assert_eq!(
            solve_linear_system(&a, &b),
            Err(RiskError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_empty_system() {
        let a = Array2::<f64>::zeros((0, 0));
        let b = Array1::<f64>::zeros(0);
        let solution = solve_linear_system(&a, &b).unwrap();
        assert!(solution.x.is_empty());
        assert!(!solution.is_degenerate());
    }
}
