#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/frontier/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod linalg;
pub mod moments;
pub mod returns;

// Re-export main types
pub use error::{Result, RiskError};
pub use linalg::{LinearSolution, LuDecomposition, PIVOT_TOLERANCE, solve_linear_system};
pub use moments::{Moments, mean_returns, sample_covariance};
pub use returns::{MIN_PRICE_MAGNITUDE, price_matrix_from_rows, simple_returns};
