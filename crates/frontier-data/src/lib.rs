#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/frontier/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod prices;

pub use error::{DataError, Result};
pub use prices::PriceTable;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
