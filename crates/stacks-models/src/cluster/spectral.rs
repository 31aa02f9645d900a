//! Spectral clustering on a normalized graph Laplacian

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use stacks_core::data::Points;

use super::kmeans::KMeans;
use super::{check_cluster_count, squared_distance, ClusterAssignment};
use crate::error::Result;

/// Spectral clustering configuration
///
/// Eigenvectors come from a fixed number of power iterations per vector
/// with no convergence check, so poorly separated spectra give rough
/// embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spectral {
    k: usize,
    sigma: f64,
    power_iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralResult {
    pub assignment: ClusterAssignment,
    /// Row `i` is the embedding of point `i`
    pub embedding: Vec<Vec<f64>>,
    /// Rayleigh quotient of each extracted eigenvector
    pub eigenvalues: Vec<f64>,
}

impl Spectral {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            sigma: 1.0,
            power_iterations: 100,
        }
    }

    /// RBF kernel width
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn fit<R: Rng + ?Sized>(&self, points: &Points, rng: &mut R) -> Result<SpectralResult> {
        check_cluster_count(points, self.k, "spectral clustering")?;

        let laplacian = self.normalized_laplacian(points);
        let (vectors, eigenvalues) = self.leading_eigenvectors(laplacian, rng);

        let n = points.len();
        let embedding = Array2::from_shape_fn((n, self.k), |(i, c)| vectors[c][i]);
        let embedded = Points::unnamed(embedding);

        let kmeans = KMeans::new(self.k).fit(&embedded, rng)?;

        Ok(SpectralResult {
            assignment: kmeans.assignment,
            embedding: embedded.coords().outer_iter().map(|r| r.to_vec()).collect(),
            eigenvalues,
        })
    }

    /// `L = I - D^-1/2 S D^-1/2` over the RBF similarity matrix `S`
    fn normalized_laplacian(&self, points: &Points) -> Array2<f64> {
        let n = points.len();
        let two_sigma_sq = 2.0 * self.sigma * self.sigma;
        let similarity = Array2::from_shape_fn((n, n), |(i, j)| {
            (-squared_distance(points.row(i), points.row(j)) / two_sigma_sq).exp()
        });
        let degree: Array1<f64> = similarity.rows().into_iter().map(|r| r.sum()).collect();

        Array2::from_shape_fn((n, n), |(i, j)| {
            if i == j {
                1.0 - similarity[(i, i)] / degree[i]
            } else {
                -similarity[(i, j)] / (degree[i] * degree[j]).sqrt()
            }
        })
    }

    /// Power iteration with deflation `M -= lambda * v v'`
    fn leading_eigenvectors<R: Rng + ?Sized>(
        &self,
        mut matrix: Array2<f64>,
        rng: &mut R,
    ) -> (Vec<Array1<f64>>, Vec<f64>) {
        let n = matrix.nrows();
        let mut vectors = Vec::with_capacity(self.k);
        let mut eigenvalues = Vec::with_capacity(self.k);

        for _ in 0..self.k {
            let mut v: Array1<f64> = (0..n).map(|_| rng.random::<f64>()).collect();
            normalize(&mut v);

            for _ in 0..self.power_iterations {
                let mut next = matrix.dot(&v);
                if !normalize(&mut next) {
                    log::debug!("power iteration reached the null space");
                    break;
                }
                v = next;
            }

            let lambda = v.dot(&matrix.dot(&v));
            for i in 0..n {
                for j in 0..n {
                    matrix[(i, j)] -= lambda * v[i] * v[j];
                }
            }

            vectors.push(v);
            eigenvalues.push(lambda);
        }

        (vectors, eigenvalues)
    }
}

/// Scale to unit length; false when the vector is zero
fn normalize(v: &mut Array1<f64>) -> bool {
    let norm = v.dot(v).sqrt();
    if norm > 0.0 {
        v.mapv_inplace(|x| x / norm);
        true
    } else {
        false
    }
}
