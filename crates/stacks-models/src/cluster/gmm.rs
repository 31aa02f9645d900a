//! Diagonal-covariance Gaussian mixture fitted by expectation-maximization

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use stacks_core::data::Points;

use super::{check_cluster_count, ClusterAssignment};
use crate::error::Result;

/// Added to every variance so a component collapsing onto one point keeps
/// a finite density
const VARIANCE_FLOOR: f64 = 1e-6;

/// Gaussian mixture configuration
///
/// Dimensions are treated as independent, so each component density is a
/// product of one-dimensional Gaussians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gmm {
    k: usize,
    max_iterations: usize,
    tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GmmResult {
    /// Most probable component of each point
    pub assignment: ClusterAssignment,
    pub weights: Vec<f64>,
    pub means: Vec<Vec<f64>>,
    pub variances: Vec<Vec<f64>>,
    pub iterations: usize,
    pub log_likelihood: f64,
    pub converged: bool,
}

struct Components {
    weights: Vec<f64>,
    means: Vec<Vec<f64>>,
    variances: Vec<Vec<f64>>,
}

impl Components {
    /// `ln(w_c) + ln N(x | mean_c, var_c)` for every component
    fn log_joint(&self, x: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(self.means.iter().zip(&self.variances))
            .map(|(w, (mean, var))| w.ln() + log_density(x, mean, var))
            .collect()
    }
}

impl Gmm {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 100,
            tolerance: 1e-4,
        }
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Stop once the log-likelihood changes by less than `tolerance`
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn fit<R: Rng + ?Sized>(&self, points: &Points, rng: &mut R) -> Result<GmmResult> {
        check_cluster_count(points, self.k, "Gaussian mixture")?;

        let n = points.len();
        let d = points.ndims();
        let rows: Vec<Vec<f64>> = (0..n).map(|i| points.row(i).to_vec()).collect();

        let bounds = points.bounds();
        let mut params = Components {
            weights: vec![1.0 / self.k as f64; self.k],
            means: (0..self.k)
                .map(|_| {
                    (0..d)
                        .map(|j| bounds.min[j] + rng.random::<f64>() * (bounds.max[j] - bounds.min[j]))
                        .collect()
                })
                .collect(),
            variances: vec![vec![1.0; d]; self.k],
        };

        let mut responsibilities = vec![vec![0.0; self.k]; n];
        let mut log_likelihood = f64::NEG_INFINITY;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            // E-step
            let mut current = 0.0;
            for (x, resp) in rows.iter().zip(responsibilities.iter_mut()) {
                let joint = params.log_joint(x);
                let total = log_sum_exp(&joint);
                for (r, lj) in resp.iter_mut().zip(&joint) {
                    *r = (lj - total).exp();
                }
                current += total;
            }

            if (current - log_likelihood).abs() < self.tolerance {
                log_likelihood = current;
                converged = true;
                break;
            }
            log_likelihood = current;

            // M-step
            for c in 0..self.k {
                let nk: f64 = responsibilities.iter().map(|r| r[c]).sum();
                if !(nk > f64::MIN_POSITIVE) {
                    log::debug!("mixture component {} has no responsibility; keeping it", c);
                    params.weights[c] = 0.0;
                    continue;
                }

                let mut mean = vec![0.0; d];
                for (x, r) in rows.iter().zip(&responsibilities) {
                    for (m, v) in mean.iter_mut().zip(x) {
                        *m += r[c] * v;
                    }
                }
                mean.iter_mut().for_each(|m| *m /= nk);

                let mut var = vec![0.0; d];
                for (x, r) in rows.iter().zip(&responsibilities) {
                    for ((s, v), m) in var.iter_mut().zip(x).zip(&mean) {
                        *s += r[c] * (v - m).powi(2);
                    }
                }
                var.iter_mut().for_each(|s| *s = *s / nk + VARIANCE_FLOOR);

                params.weights[c] = nk / n as f64;
                params.means[c] = mean;
                params.variances[c] = var;
            }

            iterations += 1;
        }

        if !log_likelihood.is_finite() {
            log::warn!("mixture log-likelihood is not finite: {}", log_likelihood);
        }
        log::debug!(
            "GMM with k = {}: {} iterations, log-likelihood {:.4}",
            self.k,
            iterations,
            log_likelihood
        );

        let labels = rows.iter().map(|x| argmax(&params.log_joint(x)));

        Ok(GmmResult {
            assignment: ClusterAssignment::from_indices(labels),
            weights: params.weights,
            means: params.means,
            variances: params.variances,
            iterations,
            log_likelihood,
            converged,
        })
    }
}

fn log_density(x: &[f64], mean: &[f64], var: &[f64]) -> f64 {
    x.iter()
        .zip(mean.iter().zip(var))
        .map(|(v, (m, s))| -0.5 * (2.0 * PI * s).ln() - (v - m).powi(2) / (2.0 * s))
        .sum()
}

fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
