//! Error types for portfolio optimization.

use frontier_risk::RiskError;
use thiserror::Error;

/// Result type for optimization operations.
pub type Result<T> = std::result::Result<T, OptimizationError>;

/// Errors that can occur while optimizing a portfolio.
#[derive(Debug, Error)]
pub enum OptimizationError {
    /// Return or moment estimation error
    #[error("Estimation error: {0}")]
    Risk(#[from] RiskError),

    /// Mean vector, covariance matrix or weights disagree on the asset count
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Invalid optimization options
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// IO error while reading an options file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Options could not be deserialized
    #[error("Options parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptimizationError {
    /// Fewer than two price periods were supplied
    pub const fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::Risk(RiskError::InsufficientData { .. }))
    }

    /// Fewer than two return periods, so the covariance is undefined
    pub const fn is_degenerate_sample(&self) -> bool {
        matches!(self, Self::Risk(RiskError::DegenerateSample { .. }))
    }

    /// Any asset-count disagreement, from estimation or system assembly
    pub const fn is_dimension_mismatch(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::Risk(RiskError::DimensionMismatch { .. })
        )
    }
}
