//! Contiguous k-fold cross-validation

use serde::{Deserialize, Serialize};

use stacks_core::data::Observation;

use super::{evaluate, Metrics, Model, Regressor};
use crate::error::{ModelError, Result};

/// Per-fold metrics and their aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidation {
    pub folds: Vec<Metrics>,
    pub mean: Metrics,
    pub std: Metrics,
}

/// Cross-validate `regressor` over `k` contiguous folds
///
/// Observations are not shuffled, so the result depends on their order.
/// Each fold holds `n / k` observations and the last fold also takes the
/// remainder.
pub fn cross_validate<R: Regressor>(
    data: &[Observation],
    regressor: &R,
    k: usize,
) -> Result<CrossValidation> {
    if k < 2 {
        return Err(ModelError::invalid_config(format!(
            "cross-validation needs at least 2 folds, got {}",
            k
        )));
    }
    if data.len() < k {
        return Err(ModelError::insufficient("cross-validation", k, data.len()));
    }

    let fold_size = data.len() / k;
    let mut folds = Vec::with_capacity(k);

    for fold in 0..k {
        let start = fold * fold_size;
        let end = if fold == k - 1 {
            data.len()
        } else {
            start + fold_size
        };

        let train: Vec<Observation> = data[..start].iter().chain(&data[end..]).copied().collect();
        let test = &data[start..end];

        let model = regressor.train(&train)?;
        let xs: Vec<f64> = test.iter().map(|o| o.x).collect();
        let actual: Vec<f64> = test.iter().map(|o| o.target).collect();
        folds.push(evaluate(&model.predict_many(&xs), &actual)?);
    }

    let (mean, std) = Metrics::aggregate(&folds);
    log::debug!("{}-fold cross-validation: mean r2 {:.4}", k, mean.r2);

    Ok(CrossValidation { folds, mean, std })
}
