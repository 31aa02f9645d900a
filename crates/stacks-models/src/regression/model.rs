//! The fitted regression model

use serde::{Deserialize, Serialize};

use super::{Model, RegressionKind};
use crate::base::{Coefficient, FitStatistics, ModelSummary};

/// How the linear predictor maps to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Link {
    Identity,
    /// Target is `exp` of the linear predictor
    Exp,
}

/// Immutable result of training a regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub(crate) kind: RegressionKind,
    coefficients: Vec<f64>,
    link: Link,
    statistics: FitStatistics,
    n_obs: usize,
}

impl FittedModel {
    pub(crate) fn new(
        kind: RegressionKind,
        coefficients: Vec<f64>,
        link: Link,
        statistics: FitStatistics,
        n_obs: usize,
    ) -> Self {
        Self {
            kind,
            coefficients,
            link,
            statistics,
            n_obs,
        }
    }

    pub fn kind(&self) -> RegressionKind {
        self.kind
    }

    pub fn link(&self) -> Link {
        self.link
    }

    /// In-sample fit, measured on the target scale
    pub fn statistics(&self) -> &FitStatistics {
        &self.statistics
    }

    pub fn n_obs(&self) -> usize {
        self.n_obs
    }

    /// Polynomial degree of the linear predictor
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Human-readable fitted equation
    pub fn equation(&self) -> String {
        let terms: Vec<String> = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(power, b)| match power {
                0 => format!("{:.4}", b),
                1 => format!("{:.4}*x", b),
                p => format!("{:.4}*x^{}", b, p),
            })
            .collect();
        let predictor = terms.join(" + ");

        match self.link {
            Link::Identity => format!("y = {}", predictor),
            Link::Exp => format!("y = exp({})", predictor),
        }
    }

    /// Generate model summary
    pub fn summary(&self) -> ModelSummary {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .map(|(power, &b)| {
                let coeff = Coefficient::new(power, b);
                match (self.link, power) {
                    (Link::Exp, 0) => coeff.with_name("ln(a)"),
                    _ => coeff,
                }
            })
            .collect();

        ModelSummary {
            kind: self.kind,
            equation: self.equation(),
            n_obs: self.n_obs,
            coefficients,
            statistics: self.statistics,
        }
    }
}

impl Model for FittedModel {
    fn predict(&self, x: f64) -> f64 {
        let eta = horner(&self.coefficients, x);
        match self.link {
            Link::Identity => eta,
            Link::Exp => eta.exp(),
        }
    }

    fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

/// Evaluate `b0 + b1*x + ... + bd*x^d` by Horner's rule
pub(crate) fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &b| acc * x + b)
}
