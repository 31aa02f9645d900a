//! Smoothing, decomposition, autocorrelation and forecasting of a single
//! evenly spaced series
//!
//! Series are plain `&[f64]` slices in time order, typically
//! [`TimeSeries::values`](stacks_core::data::TimeSeries::values).

pub mod autocorrelation;
pub mod decomposition;
pub mod forecast;
pub mod smoothing;

pub use autocorrelation::{autocorrelation, detect_seasonality, Seasonality};
pub use decomposition::{seasonal_decomposition, Decomposition};
pub use forecast::{
    Ar1, Components, Ets, ForecastMethod, ForecastResult, Forecaster, HoltWinters, ProphetLike,
};
pub use smoothing::{exponential_smoothing, moving_average};
