//! Rendering of optimized allocations and estimated moments.

use super::pipeline::last_period_date;
use frontier_data::PriceTable;
use frontier_optimizer::SolveDiagnostics;
use frontier_output::{
    AllocationExport, ExportError, ExportFormat, Exporter, PortfolioSummary, ReportBuilder,
};
use frontier_risk::Moments;
use serde_json::{Value, json};
use std::str::FromStr;

/// Output format of the `optimize` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AllocationFormat {
    /// ASCII summary box
    Text,
    /// Allocation table with a commented header
    Csv,
    /// Compact report envelope
    Json,
    /// Indented report envelope
    PrettyJson,
}

impl FromStr for AllocationFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("text") {
            return Ok(Self::Text);
        }
        Ok(match s.parse::<ExportFormat>()? {
            ExportFormat::Csv => Self::Csv,
            ExportFormat::Json => Self::Json,
            ExportFormat::PrettyJson => Self::PrettyJson,
        })
    }
}

/// Render an optimized allocation in the requested format.
///
/// Both JSON formats wrap the summary and solver diagnostics in a report.
pub(crate) fn render_allocation(
    title: String,
    table: &PriceTable,
    summary: &PortfolioSummary,
    diagnostics: SolveDiagnostics,
    format: AllocationFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match format {
        AllocationFormat::Text => format!("{summary}\n"),
        AllocationFormat::Csv => AllocationExport::from_summary(summary, last_period_date(table))
            .export_to_string(ExportFormat::Csv)?,
        AllocationFormat::Json | AllocationFormat::PrettyJson => {
            let report = ReportBuilder::new()
                .title(title)
                .dimensions(table.n_assets(), table.n_periods())
                .contents(json!({
                    "summary": serde_json::to_value(summary)?,
                    "diagnostics": serde_json::to_value(diagnostics)?,
                }))
                .build();
            if format == AllocationFormat::Json {
                serde_json::to_string(&report)?
            } else {
                report.to_json()?
            }
        }
    };
    Ok(rendered)
}

/// Text table of mean returns, volatilities and the covariance matrix.
pub(crate) fn moments_table(asset_names: &[String], moments: &Moments) -> String {
    let mut out = String::new();
    let volatilities = moments.volatilities();

    out.push_str(&format!(
        "{:<12} {:>12} {:>12}\n",
        "Asset", "Mean", "Volatility"
    ));
    out.push_str(&format!("{}\n", "─".repeat(38)));
    for (i, name) in asset_names.iter().enumerate() {
        out.push_str(&format!(
            "{:<12} {:>11.4}% {:>11.4}%\n",
            name,
            moments.mean[i] * 100.0,
            volatilities[i] * 100.0
        ));
    }

    out.push_str("\nCovariance\n");
    out.push_str(&format!("{:<12}", ""));
    for name in asset_names {
        out.push_str(&format!(" {:>12}", name));
    }
    out.push('\n');
    for (i, name) in asset_names.iter().enumerate() {
        out.push_str(&format!("{:<12}", name));
        for j in 0..asset_names.len() {
            out.push_str(&format!(" {:>12.6e}", moments.covariance[[i, j]]));
        }
        out.push('\n');
    }

    out
}

/// JSON document with per-asset means and the covariance matrix.
pub(crate) fn moments_json(asset_names: &[String], moments: &Moments) -> Value {
    let covariance: Vec<Vec<f64>> = moments
        .covariance
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();

    json!({
        "assets": asset_names,
        "mean": moments.mean.to_vec(),
        "volatility": moments.volatilities().to_vec(),
        "covariance": covariance,
    })
}
