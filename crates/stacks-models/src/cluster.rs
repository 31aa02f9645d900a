//! Clustering of min-max normalized points
//!
//! Every algorithm labels points by position: label `i` of a
//! [`ClusterAssignment`] belongs to row `i` of the input [`Points`].
//! Inputs are expected to be scaled into `[0, 1]` per field first (see
//! [`Points::min_max_normalize`]); [`ClusterAnalysis`] does this for you.
//!
//! Randomized algorithms take the random source as an explicit argument so
//! that seeded runs are reproducible.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use stacks_core::data::Points;

use crate::error::{ModelError, Result};

pub mod analysis;
pub mod dbscan;
pub mod gmm;
pub mod hierarchical;
pub mod kmeans;
pub mod spectral;

pub use analysis::{cluster_points, profile, ClusterAnalysis, ClusterMethod, ClusterProfile};
pub use dbscan::Dbscan;
pub use gmm::{Gmm, GmmResult};
pub use hierarchical::{Hierarchical, HierarchicalResult};
pub use kmeans::{Initialization, KMeans, KMeansResult};
pub use spectral::{Spectral, SpectralResult};

#[cfg(test)]
mod tests;

/// Per-point cluster labels
///
/// Labels are `0..n_clusters`, except DBSCAN noise which is [`Self::NOISE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterAssignment(Vec<i32>);

impl ClusterAssignment {
    /// Label of points that belong to no cluster
    pub const NOISE: i32 = -2;

    pub(crate) fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().map(|i| i as i32).collect())
    }

    pub fn labels(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct non-noise labels
    pub fn n_clusters(&self) -> usize {
        self.0
            .iter()
            .filter(|&&l| l >= 0)
            .max()
            .map_or(0, |&max| max as usize + 1)
    }

    pub fn noise_count(&self) -> usize {
        self.0.iter().filter(|&&l| l == Self::NOISE).count()
    }

    /// Row indices carrying `label`
    pub fn members(&self, label: i32) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }
}

impl From<Vec<i32>> for ClusterAssignment {
    fn from(labels: Vec<i32>) -> Self {
        Self(labels)
    }
}

pub(crate) fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

pub(crate) fn euclidean_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Check a requested cluster count against the input size
pub(crate) fn check_cluster_count(points: &Points, k: usize, operation: &'static str) -> Result<()> {
    if points.is_empty() {
        return Err(ModelError::insufficient(operation, 1, 0));
    }
    if k == 0 || k > points.len() {
        return Err(ModelError::invalid_config(format!(
            "{} needs 1 <= k <= {} points, got k = {}",
            operation,
            points.len(),
            k
        )));
    }
    Ok(())
}
