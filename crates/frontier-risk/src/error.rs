//! Error types for return and moment estimation.

use thiserror::Error;

/// Result type for risk estimation operations.
pub type Result<T> = std::result::Result<T, RiskError>;

/// Errors that can occur while turning prices into return moments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    /// Not enough price periods to compute a single return
    #[error("Insufficient data: need at least {required} price periods, got {actual}")]
    InsufficientData {
        /// Required number of periods
        required: usize,
        /// Actual number of periods
        actual: usize,
    },

    /// Sample covariance is undefined with fewer than two return periods
    #[error("Degenerate sample: covariance needs at least 2 return periods, got {periods}")]
    DegenerateSample {
        /// Number of return periods available
        periods: usize,
    },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Price rows carry no assets
    #[error("Price matrix has no asset columns")]
    NoAssets,
}
