//! Fixed-parameter exponential smoothing

use serde::{Deserialize, Serialize};

use super::holt_winters::HoltWinters;
use super::{ForecastResult, Forecaster};
use crate::base::Z_95;
use crate::error::Result;
use crate::stats::population_variance;

/// ETS-style smoothing with fixed constants
///
/// alpha = 0.2, beta = 0.1, gamma = 0.3 and a weekly period. The constants
/// are not fitted. Fitted values are one-step-ahead forecasts; intervals
/// widen as `z * sd(series) * sqrt(h)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ets;

impl Forecaster for Ets {
    fn forecast(&self, series: &[f64], horizon: usize) -> Result<ForecastResult> {
        let smoothing = HoltWinters::default().smooth(series, "ETS forecast")?;
        let forecasts = smoothing.project(series.len(), horizon);
        let sigma = population_variance(series).sqrt();

        Ok(ForecastResult::with_widths(
            smoothing.one_step,
            forecasts,
            |h| Z_95 * sigma * (h as f64).sqrt(),
        ))
    }
}
