//! Multiplicative decomposition by ratio to moving average

use serde::{Deserialize, Serialize};

use super::smoothing::moving_average;
use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Moving average over `period`, `n - period + 1` values
    pub trend: Vec<f64>,
    /// One factor per phase, averaging to 1
    pub seasonal: Vec<f64>,
    /// `value / (trend * seasonal)` where a trend value exists
    pub residual: Vec<Option<f64>>,
}

/// Split `series` into trend, seasonal factors and residual
///
/// Needs at least two full periods. Value `i` is paired with `trend[i]`,
/// the window starting at `i`.
pub fn seasonal_decomposition(series: &[f64], period: usize) -> Result<Decomposition> {
    if period == 0 {
        return Err(ModelError::invalid_config("decomposition period must be at least 1"));
    }
    if series.len() < 2 * period {
        return Err(ModelError::insufficient(
            "seasonal decomposition",
            2 * period,
            series.len(),
        ));
    }

    let trend = moving_average(series, period)?;

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, (value, level)) in series.iter().zip(&trend).enumerate() {
        sums[i % period] += value / level;
        counts[i % period] += 1;
    }

    let raw: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(s, &c)| s / c as f64)
        .collect();
    let mean_factor = raw.iter().sum::<f64>() / period as f64;
    let seasonal: Vec<f64> = raw.iter().map(|f| f / mean_factor).collect();

    let residual = series
        .iter()
        .enumerate()
        .map(|(i, value)| trend.get(i).map(|level| value / (level * seasonal[i % period])))
        .collect();

    Ok(Decomposition {
        trend,
        seasonal,
        residual,
    })
}
