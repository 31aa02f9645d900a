//! Lloyd's k-means

use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use stacks_core::data::Points;

use super::{check_cluster_count, squared_distance, ClusterAssignment};
use crate::error::{ModelError, Result};

/// How the first centroids are chosen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initialization {
    /// Uniformly at random within each field's observed range
    #[default]
    UniformBox,
    /// D²-weighted seeding from the data points
    KMeansPlusPlus,
    /// Fixed starting centroids, one row per cluster
    Given(Vec<Vec<f64>>),
}

/// K-means configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
    init: Initialization,
}

/// Outcome of a k-means run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansResult {
    pub assignment: ClusterAssignment,
    pub centroids: Vec<Vec<f64>>,
    pub iterations: usize,
    /// False when `max_iterations` ran out while labels were still changing
    pub converged: bool,
    /// Sum of squared distances to the assigned centroid
    pub inertia: f64,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: 100,
            init: Initialization::default(),
        }
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn init(mut self, init: Initialization) -> Self {
        self.init = init;
        self
    }

    /// Cluster `points` into `k` groups
    ///
    /// A cluster that loses all its points keeps its previous centroid; it
    /// is not reseeded, so fewer than `k` labels may be in use at the end.
    pub fn fit<R: Rng + ?Sized>(&self, points: &Points, rng: &mut R) -> Result<KMeansResult> {
        check_cluster_count(points, self.k, "k-means")?;

        let mut centroids = self.initial_centroids(points, rng)?;
        let mut labels = vec![0usize; points.len()];
        let mut iterations = 0;
        let mut changed = true;

        while changed && iterations < self.max_iterations {
            changed = false;
            iterations += 1;

            for (i, label) in labels.iter_mut().enumerate() {
                let nearest = nearest_centroid(&centroids, points, i);
                if nearest != *label {
                    *label = nearest;
                    changed = true;
                }
            }

            update_centroids(&mut centroids, points, &labels);
        }

        let inertia = labels
            .iter()
            .enumerate()
            .map(|(i, &c)| squared_distance(points.row(i), centroids.row(c)))
            .sum();

        log::debug!(
            "k-means with k = {} stopped after {} iterations (converged: {})",
            self.k,
            iterations,
            !changed
        );

        Ok(KMeansResult {
            assignment: ClusterAssignment::from_indices(labels),
            centroids: centroids.outer_iter().map(|c| c.to_vec()).collect(),
            iterations,
            converged: !changed,
            inertia,
        })
    }

    fn initial_centroids<R: Rng + ?Sized>(&self, points: &Points, rng: &mut R) -> Result<Array2<f64>> {
        let (k, d) = (self.k, points.ndims());

        match &self.init {
            Initialization::UniformBox => {
                let bounds = points.bounds();
                Ok(Array2::from_shape_fn((k, d), |(_, j)| {
                    bounds.min[j] + rng.random::<f64>() * (bounds.max[j] - bounds.min[j])
                }))
            }
            Initialization::KMeansPlusPlus => Ok(plus_plus(points, k, rng)),
            Initialization::Given(rows) => {
                if rows.len() != k || rows.iter().any(|r| r.len() != d) {
                    return Err(ModelError::invalid_config(format!(
                        "expected {} starting centroids of dimension {}",
                        k, d
                    )));
                }
                Ok(Array2::from_shape_fn((k, d), |(c, j)| rows[c][j]))
            }
        }
    }
}

fn nearest_centroid(centroids: &Array2<f64>, points: &Points, i: usize) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_distance(points.row(i), centroid);
        if dist < best_dist {
            best_dist = dist;
            best = c;
        }
    }
    best
}

fn update_centroids(centroids: &mut Array2<f64>, points: &Points, labels: &[usize]) {
    let k = centroids.nrows();
    let mut sums = Array2::<f64>::zeros(centroids.raw_dim());
    let mut counts = vec![0usize; k];

    for (i, &c) in labels.iter().enumerate() {
        let mut row = sums.row_mut(c);
        row += &points.row(i);
        counts[c] += 1;
    }

    for (c, &count) in counts.iter().enumerate() {
        if count == 0 {
            log::debug!("k-means cluster {} is empty; keeping its centroid", c);
            continue;
        }
        let mean = &sums.row(c) / count as f64;
        centroids.row_mut(c).assign(&mean);
    }
}

/// k-means++ seeding: each new centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one
fn plus_plus<R: Rng + ?Sized>(points: &Points, k: usize, rng: &mut R) -> Array2<f64> {
    let n = points.len();
    let mut centroids = Array2::zeros((k, points.ndims()));
    centroids.row_mut(0).assign(&points.row(rng.random_range(0..n)));

    let mut nearest: Array1<f64> = (0..n)
        .map(|i| squared_distance(points.row(i), centroids.row(0)))
        .collect();

    for c in 1..k {
        let total = nearest.sum();
        let chosen = if total > 0.0 {
            let target = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            nearest
                .iter()
                .position(|&d| {
                    cumulative += d;
                    cumulative > target
                })
                .unwrap_or(n - 1)
        } else {
            // Every point coincides with a chosen centroid
            rng.random_range(0..n)
        };

        centroids.row_mut(c).assign(&points.row(chosen));
        for (i, d) in nearest.iter_mut().enumerate() {
            *d = d.min(squared_distance(points.row(i), centroids.row(c)));
        }
    }

    centroids
}
