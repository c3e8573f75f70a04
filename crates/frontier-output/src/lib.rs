#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/frontier/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod palette;
pub mod report;
pub mod summary;

pub use export::{AllocationExport, ExportError, ExportFormat, Exporter};
pub use palette::{PALETTE, asset_color};
pub use report::{Report, ReportBuilder, ReportError};
pub use summary::{
    AssetAllocation, PortfolioSummary, SummaryError, generate_portfolio_summary, sharpe_ratio,
};
