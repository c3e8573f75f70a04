//! Property tests for the dense LU solver and moment estimation.

use approx::assert_abs_diff_eq;
use frontier_risk::{LuDecomposition, Moments, simple_returns, solve_linear_system};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

/// Random diagonally dominant matrix, which is guaranteed non-singular.
fn random_system(n: usize, seed: u64) -> (Array2<f64>, Array1<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut a = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        let mut off_diag = 0.0;
        for j in 0..n {
            if i != j {
                let v: f64 = rng.gen_range(-1.0..1.0);
                a[[i, j]] = v;
                off_diag += v.abs();
            }
        }
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        a[[i, i]] = sign * (off_diag + rng.gen_range(0.5..2.0));
    }
    let b = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
    (a, b)
}

/// Random bordered system with a covariance block and mean/budget borders.
///
/// The zero corner block and unit budget row force row swaps during
/// factorization.
fn random_bordered_system(n: usize, seed: u64) -> (Array2<f64>, Array1<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let n_periods = 3 * n + 5;
    let mut returns = Array2::<f64>::zeros((n_periods, n));
    for a in 0..n {
        let drift: f64 = rng.gen_range(-0.01..0.02);
        for t in 0..n_periods {
            returns[[t, a]] = drift + rng.gen_range(-0.05..0.05);
        }
    }
    let moments = Moments::estimate(&returns).unwrap();

    let size = n + 2;
    let mut a = Array2::<f64>::zeros((size, size));
    for i in 0..n {
        for j in 0..n {
            a[[i, j]] = moments.covariance[[i, j]];
        }
        a[[i, n]] = moments.mean[i];
        a[[n, i]] = moments.mean[i];
        a[[i, n + 1]] = 1.0;
        a[[n + 1, i]] = 1.0;
    }
    let mut b = Array1::<f64>::zeros(size);
    b[n] = moments.mean.mean().unwrap_or(0.0);
    b[n + 1] = 1.0;
    (a, b)
}

fn relative_residual(a: &Array2<f64>, x: &Array1<f64>, b: &Array1<f64>) -> f64 {
    let residual = a.dot(x) - b;
    let residual_norm = residual.mapv(|r| r * r).sum().sqrt();
    let b_norm = b.mapv(|v| v * v).sum().sqrt();
    residual_norm / b_norm.max(1.0)
}

#[rstest]
#[case(1, 7)]
#[case(2, 11)]
#[case(5, 23)]
#[case(12, 42)]
#[case(40, 1234)]
fn test_residual_is_small_for_nonsingular_systems(#[case] n: usize, #[case] seed: u64) {
    let (a, b) = random_system(n, seed);
    let solution = solve_linear_system(&a, &b).unwrap();

    assert!(solution.min_pivot > 1e-12);

    let residual = relative_residual(&a, &solution.x, &b);
    assert!(residual <= 1e-9, "residual {residual} too large for n = {n}");
}

#[rstest]
#[case(2, 3)]
#[case(3, 17)]
#[case(6, 58)]
#[case(15, 2718)]
fn test_residual_is_small_when_rows_must_be_swapped(#[case] n: usize, #[case] seed: u64) {
    let (a, b) = random_bordered_system(n, seed);
    let lu = LuDecomposition::new(&a).unwrap();

    let swapped = lu.permutation().iter().enumerate().any(|(i, &p)| i != p);
    assert!(swapped, "expected row swaps for n = {n}");

    let x = lu.solve(&b).unwrap();
    let residual = relative_residual(&a, &x, &b);
    assert!(residual <= 1e-9, "residual {residual} too large for n = {n}");
}

#[rstest]
#[case(4, 5)]
#[case(9, 77)]
fn test_residual_is_small_for_row_reversed_systems(#[case] n: usize, #[case] seed: u64) {
    let (a, b) = random_system(n, seed);
    let reversed_a = Array2::from_shape_fn((n, n), |(i, j)| a[[n - 1 - i, j]]);
    let reversed_b = Array1::from_shape_fn(n, |i| b[n - 1 - i]);

    let solution = solve_linear_system(&reversed_a, &reversed_b).unwrap();
    let direct = solve_linear_system(&a, &b).unwrap();

    assert!(relative_residual(&reversed_a, &solution.x, &reversed_b) <= 1e-9);
    for i in 0..n {
        assert_abs_diff_eq!(solution.x[i], direct.x[i], epsilon = 1e-9);
    }
}

#[test]
fn test_decomposition_can_be_reused_for_several_rhs() {
    let (a, b) = random_system(6, 99);
    let lu = LuDecomposition::new(&a).unwrap();

    let x1 = lu.solve(&b).unwrap();
    let b2 = b.mapv(|v| 2.0 * v);
    let x2 = lu.solve(&b2).unwrap();

    for i in 0..6 {
        assert_abs_diff_eq!(x2[i], 2.0 * x1[i], epsilon = 1e-10);
    }
}

#[test]
fn test_covariance_symmetry_on_random_prices() {
    let mut rng = StdRng::seed_from_u64(2024);
    let (n_periods, n_assets) = (30, 8);
    let mut prices = Array2::<f64>::zeros((n_periods, n_assets));
    for a in 0..n_assets {
        let mut p = 100.0;
        for t in 0..n_periods {
            p *= 1.0 + rng.gen_range(-0.05..0.05);
            prices[[t, a]] = p;
        }
    }

    let returns = simple_returns(&prices).unwrap();
    let moments = Moments::estimate(&returns).unwrap();

    for i in 0..n_assets {
        assert!(moments.covariance[[i, i]] >= 0.0);
        for j in 0..n_assets {
            assert_eq!(moments.covariance[[i, j]], moments.covariance[[j, i]]);
        }
    }
}
