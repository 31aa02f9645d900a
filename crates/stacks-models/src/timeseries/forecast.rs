//! Forecasting strategies sharing one contract
//!
//! Every [`Forecaster`] returns in-sample fitted values and `horizon`
//! forecasts with symmetric 95% intervals, so `lower[h] <= forecasts[h] <=
//! upper[h]` holds whenever the forecast and its width are finite.

use serde::{Deserialize, Serialize};

use crate::error::Result;

mod ar;
mod ets;
mod holt_winters;
mod prophet;

pub use ar::Ar1;
pub use ets::Ets;
pub use holt_winters::HoltWinters;
pub use prophet::ProphetLike;

/// A forecasting strategy
pub trait Forecaster {
    /// Fit to `series` and forecast `horizon` steps past its end
    fn forecast(&self, series: &[f64], horizon: usize) -> Result<ForecastResult>;
}

/// Fitted components of decomposing forecasters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Vec<f64>>,
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// In-sample fit, one value per input value
    pub fitted: Vec<f64>,
    pub forecasts: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl ForecastResult {
    /// Build intervals from the half-width at each step `h = 1..=horizon`
    pub(crate) fn with_widths<F>(fitted: Vec<f64>, forecasts: Vec<f64>, width: F) -> Self
    where
        F: Fn(usize) -> f64,
    {
        let (lower, upper) = forecasts
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let w = width(i + 1).abs();
                (f - w, f + w)
            })
            .unzip();

        Self {
            fitted,
            forecasts,
            lower,
            upper,
            components: None,
        }
    }

    pub(crate) fn components(mut self, components: Components) -> Self {
        self.components = Some(components);
        self
    }

    pub fn horizon(&self) -> usize {
        self.forecasts.len()
    }

    /// True when every forecast lies within its interval
    pub fn intervals_contain_forecasts(&self) -> bool {
        self.forecasts
            .iter()
            .zip(self.lower.iter().zip(&self.upper))
            .all(|(f, (lo, hi))| lo <= f && f <= hi)
    }
}

/// Forecasting strategy selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ForecastMethod {
    Ets,
    Ar1,
    HoltWinters(HoltWinters),
    ProphetLike(ProphetLike),
}

impl Forecaster for ForecastMethod {
    fn forecast(&self, series: &[f64], horizon: usize) -> Result<ForecastResult> {
        match self {
            ForecastMethod::Ets => Ets.forecast(series, horizon),
            ForecastMethod::Ar1 => Ar1.forecast(series, horizon),
            ForecastMethod::HoltWinters(hw) => hw.forecast(series, horizon),
            ForecastMethod::ProphetLike(prophet) => prophet.forecast(series, horizon),
        }
    }
}
