//! Linear and polynomial least squares

use ndarray::{Array1, Array2};

use stacks_core::data::Observation;

use super::model::horner;
use super::{
    unzip_observations, FittedModel, Link, RegressionKind, Regressor, MAX_POLYNOMIAL_DEGREE,
};
use crate::base::FitStatistics;
use crate::error::{ModelError, Result};
use crate::solver;

/// Polynomial regression of the target on powers of `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialRegression {
    degree: usize,
}

impl PolynomialRegression {
    /// Degree must lie in `1..=MAX_POLYNOMIAL_DEGREE`
    pub fn new(degree: usize) -> Result<Self> {
        if degree == 0 || degree > MAX_POLYNOMIAL_DEGREE {
            return Err(ModelError::invalid_config(format!(
                "polynomial degree must be between 1 and {}, got {}",
                MAX_POLYNOMIAL_DEGREE, degree
            )));
        }
        Ok(Self { degree })
    }

    /// Straight line `y = b0 + b1*x`
    pub fn linear() -> Self {
        Self { degree: 1 }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    fn kind(&self) -> RegressionKind {
        match self.degree {
            1 => RegressionKind::Linear,
            d => RegressionKind::Polynomial(d),
        }
    }

    /// Least-squares coefficients, intercept first
    pub(crate) fn fit_coefficients(&self, xs: &[f64], ys: &[f64]) -> Result<Vec<f64>> {
        let design = design_matrix(xs, self.degree);
        let target = Array1::from(ys.to_vec());
        Ok(solver::least_squares(&design, &target)?.to_vec())
    }
}

impl Regressor for PolynomialRegression {
    type Model = FittedModel;

    fn train(&self, data: &[Observation]) -> Result<FittedModel> {
        let n_params = self.degree + 1;
        if data.len() < n_params {
            return Err(ModelError::insufficient(
                "polynomial regression",
                n_params,
                data.len(),
            ));
        }

        let (xs, ys) = unzip_observations(data);
        let coefficients = self.fit_coefficients(&xs, &ys)?;
        let fitted: Vec<f64> = xs.iter().map(|&x| horner(&coefficients, x)).collect();

        let model = FittedModel::new(
            self.kind(),
            coefficients,
            Link::Identity,
            FitStatistics::from_fit(&ys, &fitted, n_params),
            data.len(),
        );

        log::debug!("{} fitted: {}", self.kind(), model.equation());
        Ok(model)
    }
}

/// Design matrix with columns `1, x, ..., x^degree`
pub(crate) fn design_matrix(xs: &[f64], degree: usize) -> Array2<f64> {
    Array2::from_shape_fn((xs.len(), degree + 1), |(i, j)| xs[i].powi(j as i32))
}
