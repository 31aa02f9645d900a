//! Moving average and simple exponential smoothing

use crate::error::{ModelError, Result};

/// Trailing mean over windows of `period` values
///
/// The output has `series.len() - period + 1` values; entry `i` averages
/// `series[i..i + period]`.
pub fn moving_average(series: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(ModelError::invalid_config("moving average period must be at least 1"));
    }
    if period > series.len() {
        return Err(ModelError::insufficient("moving average", period, series.len()));
    }

    Ok(series
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect())
}

/// `s[0] = x[0]`, `s[t] = alpha * x[t] + (1 - alpha) * s[t - 1]`
pub fn exponential_smoothing(series: &[f64], alpha: f64) -> Result<Vec<f64>> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ModelError::invalid_config(format!(
            "smoothing factor must lie in [0, 1], got {}",
            alpha
        )));
    }
    let Some(&first) = series.first() else {
        return Err(ModelError::insufficient("exponential smoothing", 1, 0));
    };

    let mut smoothed = Vec::with_capacity(series.len());
    smoothed.push(first);
    for &x in &series[1..] {
        let prev = smoothed[smoothed.len() - 1];
        smoothed.push(alpha * x + (1.0 - alpha) * prev);
    }
    Ok(smoothed)
}
