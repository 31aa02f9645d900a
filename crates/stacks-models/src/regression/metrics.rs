//! Prediction error metrics

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::stats::{mean, population_variance};

/// Error of a set of predictions against actual values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean squared error
    pub mse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination; NaN or -inf for a constant target
    pub r2: f64,
}

impl Metrics {
    /// Per-field mean and population standard deviation over folds
    pub(crate) fn aggregate(folds: &[Metrics]) -> (Metrics, Metrics) {
        let column = |pick: fn(&Metrics) -> f64| folds.iter().map(pick).collect::<Vec<f64>>();
        let (mse, mae, r2) = (column(|m| m.mse), column(|m| m.mae), column(|m| m.r2));

        let mean_metrics = Metrics {
            mse: mean(&mse),
            mae: mean(&mae),
            r2: mean(&r2),
        };
        let std_metrics = Metrics {
            mse: population_variance(&mse).sqrt(),
            mae: population_variance(&mae).sqrt(),
            r2: population_variance(&r2).sqrt(),
        };
        (mean_metrics, std_metrics)
    }
}

/// Compare predictions with actual values
pub fn evaluate(predictions: &[f64], actual: &[f64]) -> Result<Metrics> {
    if predictions.len() != actual.len() {
        return Err(ModelError::invalid_config(format!(
            "{} predictions for {} actual values",
            predictions.len(),
            actual.len()
        )));
    }
    if actual.is_empty() {
        return Err(ModelError::insufficient("evaluation", 1, 0));
    }

    let n = actual.len() as f64;
    let actual_mean = mean(actual);

    let (mut ss_res, mut abs_err, mut ss_tot) = (0.0, 0.0, 0.0);
    for (p, a) in predictions.iter().zip(actual) {
        let r = a - p;
        ss_res += r * r;
        abs_err += r.abs();
        ss_tot += (a - actual_mean).powi(2);
    }

    Ok(Metrics {
        mse: ss_res / n,
        mae: abs_err / n,
        r2: 1.0 - ss_res / ss_tot,
    })
}
