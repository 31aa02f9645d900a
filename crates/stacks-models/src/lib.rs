//! Computation layer of the Stacks analytics library
//!
//! Descriptive statistics, hypothesis tests, regression with
//! cross-validation, clustering and time-series forecasting over the data
//! model in [`stacks_core`]. Every routine is a pure function of its inputs
//! plus, where randomized, an explicit random source.

pub mod analytics;
pub mod base;
pub mod batch;
pub mod cluster;
pub mod error;
pub mod regression;
pub mod solver;
pub mod stats;
pub mod timeseries;

pub use analytics::Analytics;
pub use batch::{run_batch, BatchEntry, Outcome};
pub use error::{ModelError, Result};
