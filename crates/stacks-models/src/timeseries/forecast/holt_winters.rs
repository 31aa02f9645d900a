//! Triple exponential smoothing with multiplicative seasonality

use serde::{Deserialize, Serialize};

use super::{Components, ForecastResult, Forecaster};
use crate::base::Z_95;
use crate::error::{ModelError, Result};

/// Holt-Winters smoothing
///
/// Additive level and trend, multiplicative seasonal factors. Prediction
/// intervals use the in-sample residual spread:
/// `z * sigma * sqrt(1 + h / n)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoltWinters {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub period: usize,
}

impl Default for HoltWinters {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            beta: 0.1,
            gamma: 0.3,
            period: 7,
        }
    }
}

impl HoltWinters {
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta), ("gamma", self.gamma)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ModelError::invalid_config(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.period == 0 {
            return Err(ModelError::invalid_config("seasonal period must be at least 1"));
        }
        Ok(())
    }

    /// Run the smoothing recursions over the whole series
    ///
    /// Needs `n >= max(2, period)` so that the trend and every seasonal
    /// phase can be initialized.
    pub(crate) fn smooth(&self, series: &[f64], operation: &'static str) -> Result<Smoothing> {
        self.validate()?;
        let n = series.len();
        let required = self.period.max(2);
        if n < required {
            return Err(ModelError::insufficient(operation, required, n));
        }

        let mut seasonal = initial_seasonal_factors(series, self.period);
        let mut level = series[0];
        let mut trend = series[1] - series[0];

        let mut smoothing = Smoothing {
            levels: vec![level],
            trends: vec![trend],
            seasonals: vec![seasonal[0]],
            in_sample: vec![level * seasonal[0]],
            one_step: vec![level * seasonal[0]],
            level,
            trend,
            seasonal: Vec::new(),
        };

        for (t, &x) in series.iter().enumerate().skip(1) {
            let s = t % self.period;
            smoothing.one_step.push((level + trend) * seasonal[s]);

            let new_level = self.alpha * (x / seasonal[s]) + (1.0 - self.alpha) * (level + trend);
            let new_trend = self.beta * (new_level - level) + (1.0 - self.beta) * trend;
            seasonal[s] = self.gamma * (x / new_level) + (1.0 - self.gamma) * seasonal[s];
            level = new_level;
            trend = new_trend;

            smoothing.levels.push(level);
            smoothing.trends.push(trend);
            smoothing.seasonals.push(seasonal[s]);
            smoothing.in_sample.push(level * seasonal[s]);
        }

        smoothing.level = level;
        smoothing.trend = trend;
        smoothing.seasonal = seasonal;
        Ok(smoothing)
    }
}

/// State of a completed smoothing pass
pub(crate) struct Smoothing {
    pub levels: Vec<f64>,
    pub trends: Vec<f64>,
    /// Factor of the phase at each step, after its update
    pub seasonals: Vec<f64>,
    /// `level * seasonal` after each update
    pub in_sample: Vec<f64>,
    /// Forecast of each value made one step before it
    pub one_step: Vec<f64>,
    pub level: f64,
    pub trend: f64,
    /// Final factor for every phase
    pub seasonal: Vec<f64>,
}

impl Smoothing {
    /// `(level + h * trend) * seasonal` for `h = 1..=horizon`
    pub fn project(&self, n: usize, horizon: usize) -> Vec<f64> {
        let period = self.seasonal.len();
        (1..=horizon)
            .map(|h| (self.level + h as f64 * self.trend) * self.seasonal[(n + h - 1) % period])
            .collect()
    }
}

/// Per-phase means scaled to average 1
fn initial_seasonal_factors(series: &[f64], period: usize) -> Vec<f64> {
    let raw: Vec<f64> = (0..period)
        .map(|phase| {
            let values: Vec<f64> = series.iter().skip(phase).step_by(period).copied().collect();
            values.iter().sum::<f64>() / values.len() as f64
        })
        .collect();
    let mean = raw.iter().sum::<f64>() / period as f64;
    raw.iter().map(|f| f / mean).collect()
}

impl Forecaster for HoltWinters {
    fn forecast(&self, series: &[f64], horizon: usize) -> Result<ForecastResult> {
        let n = series.len();
        if n <= 3 {
            return Err(ModelError::insufficient("Holt-Winters", 4, n));
        }
        let smoothing = self.smooth(series, "Holt-Winters")?;

        let rss: f64 = series
            .iter()
            .zip(&smoothing.in_sample)
            .map(|(x, f)| (x - f).powi(2))
            .sum();
        let sigma = (rss / (n - 3) as f64).sqrt();
        let forecasts = smoothing.project(n, horizon);

        let Smoothing {
            levels,
            trends,
            seasonals,
            in_sample,
            ..
        } = smoothing;

        Ok(
            ForecastResult::with_widths(in_sample, forecasts, |h| {
                Z_95 * sigma * (1.0 + h as f64 / n as f64).sqrt()
            })
            .components(Components {
                level: Some(levels),
                trend: trends,
                seasonal: seasonals,
            }),
        )
    }
}
