//! Single-predictor regression and model selection
//!
//! Every regression here maps one predictor `x` to a target. Linear and
//! polynomial fits solve the normal equations over the design matrix
//! `[1, x, x^2, ..., x^d]`; the exponential fit is a linear fit on
//! `ln(target)`.
//!
//! # Examples
//!
//! ```
//! use stacks_core::data::Observation;
//! use stacks_models::regression::{Model, RegressionKind, Regressor};
//!
//! let data: Vec<Observation> = (1..=4).map(|i| Observation::new(i as f64, i as f64)).collect();
//! let model = RegressionKind::Linear.train(&data).unwrap();
//! assert!((model.predict(5.0) - 5.0).abs() < 1e-9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use stacks_core::data::Observation;

use crate::error::Result;

pub mod comparison;
pub mod exponential;
pub mod metrics;
pub mod model;
pub mod polynomial;
pub mod validation;

pub use comparison::{compare_models, ModelComparison, Prediction};
pub use exponential::ExponentialRegression;
pub use metrics::{evaluate, Metrics};
pub use model::{FittedModel, Link};
pub use polynomial::PolynomialRegression;
pub use validation::{cross_validate, CrossValidation};

#[cfg(test)]
mod tests;

/// Highest polynomial degree accepted; the normal equations grow
/// ill-conditioned quickly beyond it
pub const MAX_POLYNOMIAL_DEGREE: usize = 4;

/// A fitted predictor
pub trait Model {
    /// Predict the target at `x`
    fn predict(&self, x: f64) -> f64;

    /// Fitted coefficients, intercept first
    fn coefficients(&self) -> &[f64];

    /// Predict every `x` in order
    fn predict_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }
}

/// Something that fits a [`Model`] to observations
pub trait Regressor {
    type Model: Model;

    /// Fit a fresh model; the observations are not retained
    fn train(&self, data: &[Observation]) -> Result<Self::Model>;
}

/// Regression families offered for comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionKind {
    Linear,
    Polynomial(usize),
    Exponential,
}

impl fmt::Display for RegressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionKind::Linear => write!(f, "Linear Regression"),
            RegressionKind::Polynomial(degree) => {
                write!(f, "Polynomial Regression (degree {})", degree)
            }
            RegressionKind::Exponential => write!(f, "Exponential Regression"),
        }
    }
}

impl Regressor for RegressionKind {
    type Model = FittedModel;

    fn train(&self, data: &[Observation]) -> Result<FittedModel> {
        let mut model = match *self {
            RegressionKind::Linear => PolynomialRegression::linear().train(data)?,
            RegressionKind::Polynomial(degree) => PolynomialRegression::new(degree)?.train(data)?,
            RegressionKind::Exponential => ExponentialRegression.train(data)?,
        };
        model.kind = *self;
        Ok(model)
    }
}

/// Split observations into predictor and target columns
pub(crate) fn unzip_observations(data: &[Observation]) -> (Vec<f64>, Vec<f64>) {
    data.iter().map(|o| (o.x, o.target)).unzip()
}
