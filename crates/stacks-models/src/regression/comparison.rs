//! Side-by-side evaluation of regression families

use serde::{Deserialize, Serialize};

use stacks_core::data::Observation;

use super::{cross_validate, CrossValidation, Model, RegressionKind, Regressor};
use crate::base::ModelSummary;
use crate::batch::{run_batch, BatchEntry};
use crate::error::Result;

/// One observation with its in-sample prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub x: f64,
    pub actual: f64,
    pub predicted: f64,
}

/// Cross-validated and full-data results for one regression family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub kind: RegressionKind,
    pub summary: ModelSummary,
    pub cross_validation: CrossValidation,
    pub predictions: Vec<Prediction>,
}

/// Evaluate each family with `folds`-fold cross-validation, then refit on
/// all observations
///
/// Families are isolated: one that cannot be fitted yields an error entry.
pub fn compare_models(
    data: &[Observation],
    kinds: &[RegressionKind],
    folds: usize,
) -> Vec<BatchEntry<ModelComparison>> {
    run_batch(kinds.iter().map(|&kind| {
        (kind.to_string(), move || -> Result<ModelComparison> {
            let cross_validation = cross_validate(data, &kind, folds)?;
            let model = kind.train(data)?;

            let predictions = data
                .iter()
                .map(|o| Prediction {
                    x: o.x,
                    actual: o.target,
                    predicted: model.predict(o.x),
                })
                .collect();

            Ok(ModelComparison {
                kind,
                summary: model.summary(),
                cross_validation,
                predictions,
            })
        })
    }))
}
