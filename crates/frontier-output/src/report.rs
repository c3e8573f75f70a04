//! Report generation for optimization runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A report describing one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report title, usually the input file name.
    pub title: String,

    /// Report generation timestamp.
    pub timestamp: DateTime<Utc>,

    /// Number of assets in the universe.
    pub n_assets: usize,

    /// Number of price periods used.
    pub n_periods: usize,

    /// Report contents (JSON format).
    pub contents: serde_json::Value,
}

impl Report {
    /// Create a new report.
    pub fn new(
        title: String,
        n_assets: usize,
        n_periods: usize,
        contents: serde_json::Value,
    ) -> Self {
        Self {
            title,
            timestamp: Utc::now(),
            n_assets,
            n_periods,
            contents,
        }
    }

    /// Convert report to JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    title: Option<String>,
    n_assets: usize,
    n_periods: usize,
    contents: Option<serde_json::Value>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the universe dimensions.
    pub const fn dimensions(mut self, n_assets: usize, n_periods: usize) -> Self {
        self.n_assets = n_assets;
        self.n_periods = n_periods;
        self
    }

    /// Set the report contents.
    pub fn contents(mut self, contents: serde_json::Value) -> Self {
        self.contents = Some(contents);
        self
    }

    /// Serialize any value as the report contents.
    pub fn contents_from<T: Serialize>(self, value: &T) -> Result<Self, ReportError> {
        Ok(self.contents(serde_json::to_value(value)?))
    }

    /// Build the report.
    pub fn build(self) -> Report {
        Report::new(
            self.title.unwrap_or_else(|| "portfolio".to_string()),
            self.n_assets,
            self.n_periods,
            self.contents.unwrap_or(serde_json::Value::Null),
        )
    }
}
