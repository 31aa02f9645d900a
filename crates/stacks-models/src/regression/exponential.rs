//! Log-linear fit `y = exp(b0 + b1*x)`

use stacks_core::data::Observation;

use super::model::horner;
use super::{unzip_observations, FittedModel, Link, PolynomialRegression, RegressionKind, Regressor};
use crate::base::FitStatistics;
use crate::error::{ModelError, Result};

/// Exponential regression via linear least squares on `ln(target)`
///
/// The logarithm is undefined for a non-positive target. Such data trains
/// a model whose coefficients are NaN, so every prediction is NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExponentialRegression;

impl Regressor for ExponentialRegression {
    type Model = FittedModel;

    fn train(&self, data: &[Observation]) -> Result<FittedModel> {
        if data.len() < 2 {
            return Err(ModelError::insufficient(
                "exponential regression",
                2,
                data.len(),
            ));
        }

        let (xs, ys) = unzip_observations(data);

        if let Some(bad) = ys.iter().find(|&&y| !(y > 0.0)) {
            log::warn!(
                "exponential regression needs positive targets, found {}; model is undefined",
                bad
            );
            return Ok(FittedModel::new(
                RegressionKind::Exponential,
                vec![f64::NAN; 2],
                Link::Exp,
                FitStatistics::default(),
                data.len(),
            ));
        }

        let log_ys: Vec<f64> = ys.iter().map(|y| y.ln()).collect();
        let coefficients = PolynomialRegression::linear().fit_coefficients(&xs, &log_ys)?;
        let fitted: Vec<f64> = xs
            .iter()
            .map(|&x| horner(&coefficients, x).exp())
            .collect();

        Ok(FittedModel::new(
            RegressionKind::Exponential,
            coefficients,
            Link::Exp,
            FitStatistics::from_fit(&ys, &fitted, 2),
            data.len(),
        ))
    }
}
