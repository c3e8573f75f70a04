//! Glue between the command line and the library crates.
//!
//! - `pipeline`: load prices, resolve options, optimize and estimate moments
//! - `render`: text and JSON rendering of moments

pub(crate) mod pipeline;
pub(crate) mod render;
