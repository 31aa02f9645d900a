//! In-sample goodness of fit

use serde::{Deserialize, Serialize};

/// Fit statistics computed on the training observations
///
/// Entries that cannot be computed (too few residual degrees of freedom,
/// degenerate targets) are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitStatistics {
    /// R-squared
    pub r_squared: Option<f64>,
    /// Adjusted R-squared
    pub adj_r_squared: Option<f64>,
    /// Residual standard error
    pub residual_std_error: Option<f64>,
    /// Mean squared error
    pub mse: Option<f64>,
    /// Mean absolute error
    pub mae: Option<f64>,
    /// Residual degrees of freedom
    pub df_residual: Option<usize>,
    /// Model degrees of freedom
    pub df_model: Option<usize>,
}

impl FitStatistics {
    /// Statistics for `n` observations fitted with `n_params` parameters
    pub fn from_fit(actual: &[f64], fitted: &[f64], n_params: usize) -> Self {
        let n = actual.len();
        if n == 0 || n != fitted.len() {
            return Self::default();
        }

        let nf = n as f64;
        let mean = actual.iter().sum::<f64>() / nf;
        let (rss, abs_sum) = actual
            .iter()
            .zip(fitted)
            .fold((0.0, 0.0), |(rss, abs), (a, f)| {
                let r = a - f;
                (rss + r * r, abs + r.abs())
            });
        let tss: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();

        let finite = |v: f64| v.is_finite().then_some(v);
        let r_squared = finite(1.0 - rss / tss);
        let df_residual = n.checked_sub(n_params).filter(|&df| df > 0);

        Self {
            r_squared,
            adj_r_squared: df_residual.and_then(|df| {
                r_squared.and_then(|r2| finite(1.0 - (1.0 - r2) * (nf - 1.0) / df as f64))
            }),
            residual_std_error: df_residual.and_then(|df| finite((rss / df as f64).sqrt())),
            mse: finite(rss / nf),
            mae: finite(abs_sum / nf),
            df_residual,
            df_model: n_params.checked_sub(1),
        }
    }
}
