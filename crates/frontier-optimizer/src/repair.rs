//! Post-hoc constraint repair
//!
//! The KKT solve enforces only equality constraints, so its weights can be
//! negative. When non-negativity is enforced and any weight is negative, all
//! weights are clamped at zero and, if sum-to-one is also enforced, divided by
//! their clamped sum. A clamped sum at or below the tolerance is left
//! unnormalised.
//!
//! This is a heuristic: it does not re-solve under the active set, so the
//! repaired portfolio is generally not the constrained optimum and may miss
//! the target return.

use crate::options::OptimizationOptions;
use ndarray::Array1;
use tracing::{info, warn};

/// Weights after repair, with a record of what was changed
#[derive(Debug, Clone, PartialEq)]
pub struct RepairedWeights {
    /// Final weights
    pub weights: Array1<f64>,
    /// Negative weights were clamped to zero
    pub clamped: bool,
    /// Clamped weights were rescaled to sum to one
    pub renormalized: bool,
}

/// Apply the non-negativity / sum-to-one repair to raw KKT weights
pub fn repair_weights(raw: &Array1<f64>, options: &OptimizationOptions) -> RepairedWeights {
    let has_negative = raw.iter().any(|&w| w < 0.0);

    if !options.enforce_non_negativity || !has_negative {
        return RepairedWeights {
            weights: raw.clone(),
            clamped: false,
            renormalized: false,
        };
    }

    info!(
        negatives = raw.iter().filter(|&&w| w < 0.0).count(),
        "Applying non-negativity constraint"
    );
    let mut weights = raw.mapv(|w| w.max(0.0));
    let mut renormalized = false;

    if options.enforce_sum_to_one {
        let sum = weights.sum();
        if sum > options.tolerance {
            weights.mapv_inplace(|w| w / sum);
            renormalized = true;
        } else {
            warn!(sum, "Clamped weights sum to ~0, leaving them unnormalised");
        }
    }

    RepairedWeights {
        weights,
        clamped: true,
        renormalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_non_negative_weights_pass_through() {
        let raw = array![0.2, 0.3, 0.5];
        let repaired = repair_weights(&raw, &OptimizationOptions::default());

        assert_eq!(repaired.weights, raw);
        assert!(!repaired.clamped);
        assert!(!repaired.renormalized);
    }

    #[test]
    fn test_clamp_and_renormalise() {
        let raw = array![0.8, -0.3, 0.5];
        let repaired = repair_weights(&raw, &OptimizationOptions::default());

        assert!(repaired.clamped);
        assert!(repaired.renormalized);
        assert_eq!(repaired.weights[1], 0.0);
        assert_abs_diff_eq!(repaired.weights[0], 0.8 / 1.3, epsilon = 1e-12);
        assert_abs_diff_eq!(repaired.weights.sum(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_clamp_without_renormalising() {
        let raw = array![0.8, -0.3, 0.5];
        let options = OptimizationOptions::default().with_sum_to_one(false);
        let repaired = repair_weights(&raw, &options);

        assert_eq!(repaired.weights, array![0.8, 0.0, 0.5]);
        assert!(repaired.clamped);
        assert!(!repaired.renormalized);
    }

    #[test]
    fn test_trust_mode_keeps_negative_weights() {
        let raw = array![1.4, -0.4];
        let options = OptimizationOptions::default().with_non_negativity(false);
        let repaired = repair_weights(&raw, &options);

        assert_eq!(repaired.weights, raw);
        assert!(!repaired.clamped);
    }

    #[test]
    fn test_near_zero_clamped_sum_is_not_renormalised() {
        let raw = array![-0.5, 1e-10, -0.2];
        let repaired = repair_weights(&raw, &OptimizationOptions::default());

        assert_eq!(repaired.weights, array![0.0, 1e-10, 0.0]);
        assert!(repaired.clamped);
        assert!(!repaired.renormalized);
    }
}
