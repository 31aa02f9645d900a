//! Dataset-level clustering pipeline and cluster profiles

use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use stacks_core::data::{Dataset, Points};

use super::{ClusterAssignment, Dbscan, Gmm, Hierarchical, KMeans, Spectral};
use crate::error::{ModelError, Result};

/// Algorithm and parameters for one clustering run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ClusterMethod {
    KMeans { k: usize },
    Dbscan { eps: f64, min_pts: usize },
    Hierarchical { k: usize },
    Gmm { k: usize },
    Spectral { k: usize },
}

impl ClusterMethod {
    /// Methods whose cost grows with the square of the input size
    pub fn is_pairwise(&self) -> bool {
        matches!(
            self,
            ClusterMethod::Dbscan { .. }
                | ClusterMethod::Hierarchical { .. }
                | ClusterMethod::Spectral { .. }
        )
    }
}

/// Run `method` on already normalized points
pub fn cluster_points<R: Rng + ?Sized>(
    points: &Points,
    method: &ClusterMethod,
    rng: &mut R,
) -> Result<ClusterAssignment> {
    let assignment = match *method {
        ClusterMethod::KMeans { k } => KMeans::new(k).fit(points, rng)?.assignment,
        ClusterMethod::Dbscan { eps, min_pts } => Dbscan::new(eps, min_pts)?.fit(points),
        ClusterMethod::Hierarchical { k } => Hierarchical::new(k).fit(points)?.assignment,
        ClusterMethod::Gmm { k } => Gmm::new(k).fit(points, rng)?.assignment,
        ClusterMethod::Spectral { k } => Spectral::new(k).fit(points, rng)?.assignment,
    };
    Ok(assignment)
}

/// Summary of one cluster in the original (unscaled) units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub label: i32,
    pub size: usize,
    /// Per-field mean
    pub center: IndexMap<String, f64>,
    /// Per-field population variance
    pub variance: IndexMap<String, f64>,
}

/// Profiles of every label present in `assignment`, noise last
pub fn profile(points: &Points, assignment: &ClusterAssignment) -> Vec<ClusterProfile> {
    let mut labels: Vec<i32> = (0..assignment.n_clusters() as i32).collect();
    if assignment.noise_count() > 0 {
        labels.push(ClusterAssignment::NOISE);
    }

    labels
        .into_iter()
        .filter_map(|label| {
            let members = assignment.members(label);
            if members.is_empty() {
                return None;
            }
            let size = members.len() as f64;

            let mut center = IndexMap::new();
            let mut variance = IndexMap::new();
            for (j, field) in points.fields().iter().enumerate() {
                let values: Vec<f64> = members.iter().map(|&i| points.coords()[(i, j)]).collect();
                let mean = values.iter().sum::<f64>() / size;
                let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / size;
                center.insert(field.clone(), mean);
                variance.insert(field.clone(), var);
            }

            Some(ClusterProfile {
                label,
                size: members.len(),
                center,
                variance,
            })
        })
        .collect()
}

/// Clustering of a dataset on selected numeric fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAnalysis {
    pub method: ClusterMethod,
    pub fields: Vec<String>,
    /// One label per dataset record, in record order
    pub assignment: ClusterAssignment,
    pub profiles: Vec<ClusterProfile>,
}

impl ClusterAnalysis {
    /// Project, size-guard, normalize, cluster and profile
    ///
    /// `max_points` bounds the input of the quadratic methods.
    pub fn run<S, R>(
        dataset: &Dataset,
        fields: &[S],
        method: ClusterMethod,
        max_points: usize,
        rng: &mut R,
    ) -> Result<Self>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        let points = dataset.points(fields)?;
        if method.is_pairwise() && points.len() > max_points {
            return Err(ModelError::invalid_config(format!(
                "{} points exceed the limit of {} for {:?}",
                points.len(),
                max_points,
                method
            )));
        }

        let normalized = points.min_max_normalize();
        let assignment = cluster_points(&normalized, &method, rng)?;
        let profiles = profile(&points, &assignment);

        log::debug!(
            "clustered {} records into {} clusters ({} noise)",
            points.len(),
            assignment.n_clusters(),
            assignment.noise_count()
        );

        Ok(Self {
            method,
            fields: points.fields().to_vec(),
            assignment,
            profiles,
        })
    }
}
