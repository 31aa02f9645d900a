//! Density-based clustering

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use stacks_core::data::Points;

use super::{euclidean_distance, ClusterAssignment};
use crate::error::{ModelError, Result};

/// Internal marker for points not yet reached
const UNVISITED: i32 = -1;

/// DBSCAN with brute-force neighbourhood queries
///
/// A neighbourhood contains every point within `eps`, the query point
/// included. A point is a core point when its neighbourhood holds at least
/// `min_pts` points. Noise reached later from a core point becomes a border
/// point of that cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dbscan {
    eps: f64,
    min_pts: usize,
}

impl Dbscan {
    pub fn new(eps: f64, min_pts: usize) -> Result<Self> {
        if !eps.is_finite() || eps < 0.0 {
            return Err(ModelError::invalid_config(format!(
                "eps must be a finite non-negative distance, got {}",
                eps
            )));
        }
        if min_pts == 0 {
            return Err(ModelError::invalid_config("min_pts must be at least 1"));
        }
        Ok(Self { eps, min_pts })
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    pub fn fit(&self, points: &Points) -> ClusterAssignment {
        let n = points.len();
        let mut labels = vec![UNVISITED; n];
        let mut cluster = 0;

        for i in 0..n {
            if labels[i] != UNVISITED {
                continue;
            }

            let neighbours = self.region_query(points, i);
            if neighbours.len() < self.min_pts {
                labels[i] = ClusterAssignment::NOISE;
                continue;
            }

            labels[i] = cluster;
            let mut queued = vec![false; n];
            queued[i] = true;
            let mut seeds: VecDeque<usize> = VecDeque::new();
            for q in neighbours {
                if !queued[q] {
                    queued[q] = true;
                    seeds.push_back(q);
                }
            }

            while let Some(q) = seeds.pop_front() {
                if labels[q] == ClusterAssignment::NOISE {
                    labels[q] = cluster;
                    continue;
                }
                if labels[q] != UNVISITED {
                    continue;
                }

                labels[q] = cluster;
                let expansion = self.region_query(points, q);
                if expansion.len() >= self.min_pts {
                    for r in expansion {
                        if !queued[r] {
                            queued[r] = true;
                            seeds.push_back(r);
                        }
                    }
                }
            }

            cluster += 1;
        }

        log::debug!(
            "DBSCAN found {} clusters in {} points",
            cluster,
            points.len()
        );
        ClusterAssignment::from(labels)
    }

    fn region_query(&self, points: &Points, i: usize) -> Vec<usize> {
        (0..points.len())
            .filter(|&j| euclidean_distance(points.row(i), points.row(j)) <= self.eps)
            .collect()
    }
}
