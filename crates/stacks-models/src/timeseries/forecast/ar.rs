//! First-order autoregression

use serde::{Deserialize, Serialize};

use super::{ForecastResult, Forecaster};
use crate::base::Z_95;
use crate::error::{ModelError, Result};
use crate::stats::{pearson, population_variance};

/// AR(1) without intercept: `x[t] = phi * x[t - 1]`
///
/// `phi` is the correlation between the series and itself shifted by one.
/// Interval half-width is `z * sd(series) * sqrt(1 - phi^(2h))`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ar1;

impl Forecaster for Ar1 {
    fn forecast(&self, series: &[f64], horizon: usize) -> Result<ForecastResult> {
        let n = series.len();
        if n < 3 {
            return Err(ModelError::insufficient("AR(1) forecast", 3, n));
        }

        let phi = pearson(&series[..n - 1], &series[1..])?;
        let sigma = population_variance(series).sqrt();

        let fitted = std::iter::once(series[0])
            .chain(series[..n - 1].iter().map(|x| phi * x))
            .collect();

        let mut forecasts = Vec::with_capacity(horizon);
        let mut previous = series[n - 1];
        for _ in 0..horizon {
            previous *= phi;
            forecasts.push(previous);
        }

        Ok(ForecastResult::with_widths(fitted, forecasts, |h| {
            Z_95 * sigma * (1.0 - phi.powi(2 * h as i32)).max(0.0).sqrt()
        }))
    }
}
