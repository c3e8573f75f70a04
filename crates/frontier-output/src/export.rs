//! Export functionality for optimized allocations.
//!
//! Allocations can be written as CSV (with a commented header block) or as
//! compact or pretty-printed JSON.

use crate::summary::{AssetAllocation, PortfolioSummary};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "prettyjson" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Allocation snapshot ready for export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationExport {
    /// Portfolio name.
    pub name: String,

    /// Date of the last price period used.
    pub date: Option<NaiveDate>,

    /// Expected return of the allocation.
    pub expected_return: f64,

    /// Volatility of the allocation.
    pub volatility: f64,

    /// Per-asset weights.
    pub holdings: Vec<AssetAllocation>,
}

impl AllocationExport {
    /// Create an export from a portfolio summary.
    pub fn from_summary(summary: &PortfolioSummary, date: Option<NaiveDate>) -> Self {
        Self {
            name: summary.name.clone(),
            date,
            expected_return: summary.expected_return,
            volatility: summary.volatility,
            holdings: summary.allocations.clone(),
        }
    }

    /// Get total portfolio weight (should be close to 1.0).
    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for AllocationExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut output = String::new();

                // Write header information as comments
                output.push_str(&format!("# Portfolio: {}\n", self.name));
                if let Some(date) = self.date {
                    output.push_str(&format!("# Date: {}\n", date));
                }
                output.push_str(&format!("# Expected Return: {}\n", self.expected_return));
                output.push_str(&format!("# Volatility: {}\n", self.volatility));
                output.push_str(&format!("# Total Weight: {}\n", self.total_weight()));

                let mut wtr = csv::Writer::from_writer(vec![]);
                for holding in &self.holdings {
                    wtr.serialize(holding)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                let holdings_data = String::from_utf8(bytes)
                    .map_err(|e| ExportError::InvalidFormat(e.to_string()))?;
                output.push_str(&holdings_data);
                Ok(output)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for PortfolioSummary {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => AllocationExport::from_summary(self, None).export_to_string(format),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
