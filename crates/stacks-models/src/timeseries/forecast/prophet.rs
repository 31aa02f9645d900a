//! Piecewise-linear trend plus Fourier seasonality

use std::f64::consts::PI;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::{Components, ForecastResult, Forecaster};
use crate::base::Z_95;
use crate::error::{ModelError, Result};
use crate::solver;

/// Seasonal cycles as `(period, harmonics)`: weekly and yearly
const SEASONS: [(f64, usize); 2] = [(7.0, 3), (365.0, 5)];

/// Cycles the series covers at least once
///
/// Fourier terms of a longer cycle are nearly collinear over a short
/// history and make the normal equations singular.
fn active_seasons(n: usize) -> Vec<(f64, usize)> {
    SEASONS
        .into_iter()
        .filter(|&(period, _)| n as f64 >= period)
        .collect()
}

/// A simplified Prophet-style additive model
///
/// The trend is a linear fit with a hinge `max(0, t - c)` at each of
/// `changepoints` evenly spaced candidate points. Seasonality is a second
/// least-squares fit of Fourier terms to the trend residuals, using only
/// the cycles the series spans in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProphetLike {
    pub changepoints: usize,
}

impl Default for ProphetLike {
    fn default() -> Self {
        Self { changepoints: 10 }
    }
}

impl ProphetLike {
    pub fn changepoints(mut self, changepoints: usize) -> Self {
        self.changepoints = changepoints;
        self
    }

    /// Candidate changepoint positions for a series of length `n`
    fn changepoint_positions(&self, n: usize) -> Vec<usize> {
        let step = n / (self.changepoints + 1);
        if step == 0 {
            return Vec::new();
        }
        (step..n.saturating_sub(step)).step_by(step).collect()
    }
}

fn trend_row(t: f64, changepoints: &[usize]) -> Vec<f64> {
    let mut row = vec![1.0, t];
    row.extend(changepoints.iter().map(|&c| (t - c as f64).max(0.0)));
    row
}

fn seasonal_row(t: f64, seasons: &[(f64, usize)]) -> Vec<f64> {
    let mut row = Vec::new();
    for &(period, harmonics) in seasons {
        let x = 2.0 * PI * t / period;
        for k in 1..=harmonics {
            row.push((k as f64 * x).sin());
            row.push((k as f64 * x).cos());
        }
    }
    row
}

fn design(n: usize, row: impl Fn(f64) -> Vec<f64>) -> Array2<f64> {
    let rows: Vec<Vec<f64>> = (0..n).map(|t| row(t as f64)).collect();
    let width = rows.first().map_or(0, Vec::len);
    Array2::from_shape_fn((n, width), |(i, j)| rows[i][j])
}

fn dot(row: &[f64], coefficients: &Array1<f64>) -> f64 {
    row.iter().zip(coefficients.iter()).map(|(x, b)| x * b).sum()
}

impl Forecaster for ProphetLike {
    fn forecast(&self, series: &[f64], horizon: usize) -> Result<ForecastResult> {
        let n = series.len();
        let changepoints = self.changepoint_positions(n);
        let seasons = active_seasons(n);
        let n_params = 2 + changepoints.len() + seasons.iter().map(|(_, k)| 2 * k).sum::<usize>();
        if n <= n_params {
            return Err(ModelError::insufficient("Prophet-like forecast", n_params + 1, n));
        }

        let y = Array1::from(series.to_vec());
        let trend_x = design(n, |t| trend_row(t, &changepoints));
        let trend_coef = solver::least_squares(&trend_x, &y)?;
        let trend = trend_x.dot(&trend_coef);

        let seasonal_x = design(n, |t| seasonal_row(t, &seasons));
        let seasonal_coef = solver::least_squares(&seasonal_x, &(&y - &trend))?;
        let seasonal = seasonal_x.dot(&seasonal_coef);

        let fitted = &trend + &seasonal;
        let rss: f64 = y.iter().zip(fitted.iter()).map(|(a, f)| (a - f).powi(2)).sum();
        let sigma = (rss / (n - n_params) as f64).sqrt();

        let forecasts = (1..=horizon)
            .map(|h| {
                let t = (n + h - 1) as f64;
                dot(&trend_row(t, &changepoints), &trend_coef) + dot(&seasonal_row(t, &seasons), &seasonal_coef)
            })
            .collect();

        log::debug!(
            "Prophet-like fit with {} changepoints, residual sd {:.4}",
            changepoints.len(),
            sigma
        );

        Ok(
            ForecastResult::with_widths(fitted.to_vec(), forecasts, |h| {
                Z_95 * sigma * (1.0 + h as f64 / n as f64).sqrt()
            })
            .components(Components {
                level: None,
                trend: trend.to_vec(),
                seasonal: seasonal.to_vec(),
            }),
        )
    }
}
