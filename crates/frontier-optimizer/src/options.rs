//! Optimization options
//!
//! Options can be built in code, deserialized from JSON, or loaded from a
//! JSON file. Missing keys fall back to their defaults, and both snake_case
//! and camelCase key spellings are accepted.

use crate::error::{OptimizationError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optimizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationOptions {
    /// Numerical zero threshold, also the minimum clamped weight sum that
    /// allows renormalisation (default: 1e-8)
    pub tolerance: f64,

    /// Iteration cap for iterative solvers (default: 1000)
    /// The direct KKT solve does not iterate, so this is carried but unused.
    #[serde(alias = "maxIterations")]
    pub max_iterations: usize,

    /// Clamp negative weights to zero (default: true)
    #[serde(alias = "enforceNonNegativity", alias = "nonNegativity")]
    pub enforce_non_negativity: bool,

    /// Renormalise clamped weights to sum to one (default: true)
    #[serde(alias = "enforceSumToOne", alias = "sumToOne")]
    pub enforce_sum_to_one: bool,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 1000,
            enforce_non_negativity: true,
            enforce_sum_to_one: true,
        }
    }
}

impl OptimizationOptions {
    /// Parse options from a JSON document
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the options are invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is malformed, or holds
    /// invalid options.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that the options are usable
    ///
    /// # Errors
    /// Returns [`OptimizationError::InvalidOptions`] for a negative or
    /// non-finite tolerance, or a zero iteration cap.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(OptimizationError::InvalidOptions(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(OptimizationError::InvalidOptions(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the tolerance
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable clamping of negative weights
    pub const fn with_non_negativity(mut self, enforce: bool) -> Self {
        self.enforce_non_negativity = enforce;
        self
    }

    /// Enable or disable renormalisation after clamping
    pub const fn with_sum_to_one(mut self, enforce: bool) -> Self {
        self.enforce_sum_to_one = enforce;
        self
    }
}
