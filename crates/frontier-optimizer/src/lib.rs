#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/frontier/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod kkt;
pub mod metrics;
pub mod optimizer;
pub mod options;
pub mod repair;

pub use error::{OptimizationError, Result};
pub use kkt::{KktSolution, KktSystem};
pub use metrics::PortfolioMetrics;
pub use optimizer::{
    ConstraintCheck, MeanVarianceOptimizer, OptimizationResult, SolveDiagnostics,
    optimize_portfolio,
};
pub use options::OptimizationOptions;
pub use repair::{RepairedWeights, repair_weights};
