//! Autocorrelation and seasonality strength

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::stats::mean;

/// Sample autocorrelation at lags `0..=max_lag`
///
/// Uses the biased autocovariance (every lag divided by `n`), so the
/// sequence starts at 1 and decays toward 0. A constant series yields NaN.
pub fn autocorrelation(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    let n = series.len();
    if max_lag >= n {
        return Err(ModelError::insufficient("autocorrelation", max_lag + 1, n));
    }

    let m = mean(series);
    let centered: Vec<f64> = series.iter().map(|x| x - m).collect();
    let denominator: f64 = centered.iter().map(|d| d * d).sum();

    Ok((0..=max_lag)
        .map(|lag| {
            let numerator: f64 = centered[..n - lag]
                .iter()
                .zip(&centered[lag..])
                .map(|(a, b)| a * b)
                .sum();
            numerator / denominator
        })
        .collect())
}

/// Strength of a repeating pattern at one candidate period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub period: usize,
    /// `1 - sum((x[i] - x[i + p])^2) / (2 * sum(x[i]^2))` over `i < n - p`
    pub strength: f64,
    /// Strength above 0.5
    pub significant: bool,
}

/// Seasonality at `period`, or `None` with fewer than two full periods
pub fn detect_seasonality(series: &[f64], period: usize) -> Option<Seasonality> {
    let n = series.len();
    if period == 0 || n < 2 * period {
        return None;
    }

    let (diff_sq, level_sq) = series[..n - period]
        .iter()
        .zip(&series[period..])
        .fold((0.0, 0.0), |(d, s), (a, b)| (d + (a - b).powi(2), s + a * a));
    let strength = 1.0 - diff_sq / (2.0 * level_sq);

    Some(Seasonality {
        period,
        strength,
        significant: strength > 0.5,
    })
}
