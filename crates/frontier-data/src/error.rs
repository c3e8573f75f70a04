//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading price data.
#[derive(Debug, Error)]
pub enum DataError {
    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input has no header or no data rows
    #[error("CSV must contain at least a header and one data row")]
    NoDataRows,

    /// Header has a period column but no asset columns
    #[error("CSV header must name at least one asset column after the period column")]
    NoAssetColumns,
}
