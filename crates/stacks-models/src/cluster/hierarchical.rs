//! Agglomerative clustering with complete linkage

use serde::{Deserialize, Serialize};

use stacks_core::data::Points;

use super::{check_cluster_count, euclidean_distance, ClusterAssignment};
use crate::error::Result;

/// Bottom-up merging until `k` clusters remain
///
/// The distance between two clusters is the largest distance between their
/// members. Ties go to the pair found first in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchical {
    k: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchicalResult {
    pub assignment: ClusterAssignment,
    /// Linkage distance of each merge, in merge order
    pub merge_distances: Vec<f64>,
}

impl Hierarchical {
    pub fn new(k: usize) -> Self {
        Self { k }
    }

    pub fn fit(&self, points: &Points) -> Result<HierarchicalResult> {
        check_cluster_count(points, self.k, "hierarchical clustering")?;

        let n = points.len();
        let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
        let mut linkage: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| euclidean_distance(points.row(i), points.row(j)))
                    .collect()
            })
            .collect();
        let mut merge_distances = Vec::with_capacity(n - self.k);

        while clusters.len() > self.k {
            let (a, b, dist) = closest_pair(&linkage);

            // Complete linkage: the merged cluster is as far as its farther half
            for m in 0..linkage.len() {
                let merged = linkage[a][m].max(linkage[b][m]);
                linkage[a][m] = merged;
                linkage[m][a] = merged;
            }
            linkage.remove(b);
            for row in &mut linkage {
                row.remove(b);
            }

            let absorbed = clusters.remove(b);
            clusters[a].extend(absorbed);
            merge_distances.push(dist);
        }

        let mut labels = vec![0usize; n];
        for (label, members) in clusters.iter().enumerate() {
            for &i in members {
                labels[i] = label;
            }
        }

        Ok(HierarchicalResult {
            assignment: ClusterAssignment::from_indices(labels),
            merge_distances,
        })
    }
}

/// `(i, j, distance)` with `i < j` minimizing the linkage distance
fn closest_pair(linkage: &[Vec<f64>]) -> (usize, usize, f64) {
    let mut best = (0, 1, f64::INFINITY);
    for i in 0..linkage.len() {
        for j in i + 1..linkage.len() {
            if linkage[i][j] < best.2 {
                best = (i, j, linkage[i][j]);
            }
        }
    }
    best
}
