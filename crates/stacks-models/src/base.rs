//! Shared result types for fitted models
//!
//! Fitted regressions report their terms as [`Coefficient`]s and their
//! in-sample fit as [`FitStatistics`]; [`ModelSummary`] renders both.

pub use coefficient::Coefficient;
pub use statistics::FitStatistics;
pub use summary::ModelSummary;

pub use crate::error::{ModelError, Result};

pub mod coefficient;
pub mod statistics;
pub mod summary;

/// Significance threshold applied to every hypothesis test
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Two-sided 95% normal quantile used for forecast intervals
pub const Z_95: f64 = 1.96;
