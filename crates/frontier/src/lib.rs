#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/frontier/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export sub-crates
pub use frontier_data as data;
pub use frontier_optimizer as optimizer;
pub use frontier_output as output;
pub use frontier_risk as risk;

// Re-export the main entry points
pub use frontier_data::PriceTable;
pub use frontier_optimizer::{
    MeanVarianceOptimizer, OptimizationError, OptimizationOptions, OptimizationResult,
    optimize_portfolio,
};
pub use frontier_output::{PortfolioSummary, generate_portfolio_summary};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
