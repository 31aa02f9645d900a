//! Tests for clustering algorithms

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use super::*;
use crate::error::ModelError;
use stacks_core::data::{DatasetBuilder, Points};

// ==================== Test Fixtures ====================

/// Two groups of 20 points around (0, 0) and (10, 10), normalized
fn two_groups(seed: u64) -> Points {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.5).unwrap();
    let rows: Vec<Vec<f64>> = (0..40)
        .map(|i| {
            let center = if i < 20 { 0.0 } else { 10.0 };
            vec![center + noise.sample(&mut rng), center + noise.sample(&mut rng)]
        })
        .collect();
    Points::from_rows(&["loans", "renewals"], &rows)
        .unwrap()
        .min_max_normalize()
}

/// True when the first and second halves each share one distinct label
fn separates_halves(assignment: &ClusterAssignment) -> bool {
    let labels = assignment.labels();
    let (a, b) = labels.split_at(labels.len() / 2);
    a.iter().all(|&l| l == a[0]) && b.iter().all(|&l| l == b[0]) && a[0] != b[0]
}

fn line(values: &[f64]) -> Points {
    let rows: Vec<Vec<f64>> = values.iter().map(|&v| vec![v]).collect();
    Points::from_rows(&["x"], &rows).unwrap()
}

// ==================== Assignment ====================

#[test]
fn test_assignment_accessors() {
    let assignment = ClusterAssignment::from(vec![0, 1, ClusterAssignment::NOISE, 1]);
    assert_eq!(assignment.len(), 4);
    assert_eq!(assignment.n_clusters(), 2);
    assert_eq!(assignment.noise_count(), 1);
    assert_eq!(assignment.members(1), vec![1, 3]);
}

// ==================== K-means ====================

#[test]
fn test_kmeans_single_cluster_is_mean() {
    let points = two_groups(1);
    let mut rng = StdRng::seed_from_u64(7);
    let result = KMeans::new(1).fit(&points, &mut rng).unwrap();

    assert!(result.assignment.labels().iter().all(|&l| l == 0));
    let mean = points.mean().unwrap();
    for (c, m) in result.centroids[0].iter().zip(mean.iter()) {
        assert_abs_diff_eq!(*c, *m, epsilon = 1e-12);
    }
    assert!(result.converged);
}

#[test]
fn test_kmeans_recovers_generating_groups() {
    let points = two_groups(3);
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = KMeans::new(2)
            .init(Initialization::KMeansPlusPlus)
            .fit(&points, &mut rng)
            .unwrap();
        assert!(separates_halves(&result.assignment), "seed {}", seed);
        assert!(result.converged);
    }
}

#[test]
fn test_kmeans_is_reproducible_with_seed() {
    let points = two_groups(5);
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        KMeans::new(3).fit(&points, &mut rng).unwrap()
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn test_kmeans_empty_cluster_keeps_centroid() {
    let points = Points::from_rows(
        &["a", "b"],
        &[vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
    )
    .unwrap();
    let init = Initialization::Given(vec![vec![5.0, 5.0], vec![0.5, 0.5]]);

    let mut rng = StdRng::seed_from_u64(0);
    let result = KMeans::new(2).init(init).fit(&points, &mut rng).unwrap();

    assert!(result.assignment.labels().iter().all(|&l| l == 1));
    assert_eq!(result.centroids[0], vec![5.0, 5.0]);
    assert_eq!(result.centroids[1], vec![0.5, 0.5]);
    assert_eq!(result.iterations, 2);
    assert!(result.converged);
    assert_abs_diff_eq!(result.inertia, 2.0, epsilon = 1e-12);
}

#[test]
fn test_uniform_box_can_strand_a_centroid() {
    let points = two_groups(3);

    let mut stranded = 0;
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = KMeans::new(2)
            .init(Initialization::UniformBox)
            .fit(&points, &mut rng)
            .unwrap();

        assert_eq!(result.assignment.len(), points.len());
        assert_eq!(result.centroids.len(), 2);

        let labels = result.assignment.labels();
        assert_eq!(result.assignment.noise_count(), 0);
        if labels.iter().all(|&l| l == labels[0]) {
            stranded += 1;
        }
    }
    assert!(stranded >= 1);
}

#[test]
fn test_kmeans_invalid_k() {
    let points = line(&[0.0, 0.5, 1.0]);
    let mut rng = StdRng::seed_from_u64(0);

    assert!(matches!(
        KMeans::new(0).fit(&points, &mut rng),
        Err(ModelError::InvalidConfig { .. })
    ));
    assert!(matches!(
        KMeans::new(4).fit(&points, &mut rng),
        Err(ModelError::InvalidConfig { .. })
    ));
    assert!(KMeans::new(2)
        .init(Initialization::Given(vec![vec![0.0]]))
        .fit(&points, &mut rng)
        .is_err());
}

// ==================== DBSCAN ====================

#[test]
fn test_dbscan_wide_eps_single_cluster() {
    let points = two_groups(2);
    let assignment = Dbscan::new(2.0, points.len()).unwrap().fit(&points);

    assert!(assignment.labels().iter().all(|&l| l == 0));
    assert_eq!(assignment.noise_count(), 0);
}

#[test]
fn test_dbscan_noise_and_clusters() {
    let points = Points::from_rows(
        &["a", "b"],
        &[
            vec![0.0, 0.0],
            vec![0.0, 0.1],
            vec![0.1, 0.0],
            vec![1.0, 1.0],
            vec![1.0, 0.9],
            vec![0.9, 1.0],
            vec![0.5, 0.5],
        ],
    )
    .unwrap();

    let assignment = Dbscan::new(0.2, 3).unwrap().fit(&points);
    assert_eq!(
        assignment.labels(),
        &[0, 0, 0, 1, 1, 1, ClusterAssignment::NOISE]
    );
}

#[test]
fn test_dbscan_noise_becomes_border() {
    // The first point is not core, but the second is and reaches it
    let points = line(&[0.0, 0.1, 0.2, 0.3]);
    let assignment = Dbscan::new(0.15, 3).unwrap().fit(&points);

    assert_eq!(assignment.labels(), &[0, 0, 0, 0]);
    assert!(assignment.labels().iter().all(|&l| l != -1));
}

#[test]
fn test_dbscan_invalid_parameters() {
    assert!(Dbscan::new(-0.1, 3).is_err());
    assert!(Dbscan::new(f64::NAN, 3).is_err());
    assert!(Dbscan::new(0.1, 0).is_err());
}

// ==================== Hierarchical ====================

#[test]
fn test_hierarchical_complete_linkage() {
    let points = line(&[0.0, 0.1, 0.5, 0.55, 1.0]);
    let result = Hierarchical::new(2).fit(&points).unwrap();

    assert_eq!(result.assignment.labels(), &[0, 0, 1, 1, 1]);
    let expected = [0.05, 0.1, 0.5];
    assert_eq!(result.merge_distances.len(), 3);
    for (d, e) in result.merge_distances.iter().zip(expected) {
        assert_abs_diff_eq!(*d, e, epsilon = 1e-12);
    }
}

#[test]
fn test_hierarchical_bounds() {
    let points = line(&[0.0, 0.4, 1.0]);
    let singletons = Hierarchical::new(3).fit(&points).unwrap();
    assert_eq!(singletons.assignment.labels(), &[0, 1, 2]);
    assert!(singletons.merge_distances.is_empty());

    assert!(matches!(
        Hierarchical::new(4).fit(&points),
        Err(ModelError::InvalidConfig { .. })
    ));
}

// ==================== Gaussian mixture ====================

#[test]
fn test_gmm_single_component() {
    let points = line(&[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    let mut rng = StdRng::seed_from_u64(4);
    let result = Gmm::new(1).fit(&points, &mut rng).unwrap();

    assert!(result.converged);
    assert_abs_diff_eq!(result.weights[0], 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.means[0][0], 0.5, epsilon = 1e-12);
    // Population variance 0.7 / 6 plus the floor
    assert_abs_diff_eq!(result.variances[0][0], 0.7 / 6.0 + 1e-6, epsilon = 1e-12);
    assert!(result.log_likelihood.is_finite());
}

#[test]
fn test_gmm_separates_groups() {
    let points = two_groups(8);
    let mut separated = 0;
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = Gmm::new(2).fit(&points, &mut rng).unwrap();

        assert_eq!(result.assignment.len(), points.len());
        assert_abs_diff_eq!(result.weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        assert!(result.variances.iter().flatten().all(|&v| v >= 1e-6));
        assert!(result.iterations <= 100);
        if separates_halves(&result.assignment) {
            separated += 1;
        }
    }
    assert!(separated >= 8, "only {} of 10 runs separated", separated);
}

// ==================== Spectral ====================

#[test]
fn test_spectral_shapes_and_reproducibility() {
    let points = two_groups(9);
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        Spectral::new(2).fit(&points, &mut rng).unwrap()
    };

    let result = run(21);
    assert_eq!(result.assignment.len(), 40);
    assert!(result.assignment.labels().iter().all(|&l| l == 0 || l == 1));
    assert_eq!(result.embedding.len(), 40);
    assert!(result.embedding.iter().all(|row| row.len() == 2));
    assert_eq!(result.eigenvalues.len(), 2);

    assert_eq!(result, run(21));
}

// ==================== Pipeline ====================

#[test]
fn test_cluster_analysis_profiles_in_original_units() {
    let dataset = DatasetBuilder::new()
        .with_column("loans", [10.0, 11.0, 50.0, 51.0])
        .unwrap()
        .with_column("rating", [1.0, 1.1, 5.0, 5.1])
        .unwrap()
        .build();
    let method = ClusterMethod::Dbscan {
        eps: 0.3,
        min_pts: 2,
    };

    let mut rng = StdRng::seed_from_u64(0);
    let analysis = ClusterAnalysis::run(&dataset, &["loans", "rating"], method, 100, &mut rng).unwrap();

    assert_eq!(analysis.assignment.labels(), &[0, 0, 1, 1]);
    assert_eq!(analysis.profiles.len(), 2);
    let first = &analysis.profiles[0];
    assert_eq!(first.size, 2);
    assert_abs_diff_eq!(first.center["loans"], 10.5, epsilon = 1e-12);
    assert_abs_diff_eq!(first.center["rating"], 1.05, epsilon = 1e-12);
    assert_abs_diff_eq!(first.variance["loans"], 0.25, epsilon = 1e-12);
}

#[test]
fn test_cluster_analysis_size_guard() {
    let dataset = DatasetBuilder::new()
        .with_column("loans", [1.0, 2.0, 3.0, 4.0])
        .unwrap()
        .build();
    let mut rng = StdRng::seed_from_u64(0);

    let err = ClusterAnalysis::run(
        &dataset,
        &["loans"],
        ClusterMethod::Hierarchical { k: 2 },
        3,
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::InvalidConfig { .. }));

    // k-means is linear in the input and not guarded
    assert!(ClusterAnalysis::run(&dataset, &["loans"], ClusterMethod::KMeans { k: 2 }, 3, &mut rng).is_ok());
}

#[test]
fn test_cluster_method_from_json() {
    let method: ClusterMethod =
        serde_json::from_str(r#"{"method": "dbscan", "eps": 0.2, "min_pts": 3}"#).unwrap();
    assert_eq!(method, ClusterMethod::Dbscan { eps: 0.2, min_pts: 3 });
    assert!(method.is_pairwise());

    let method: ClusterMethod = serde_json::from_str(r#"{"method": "k_means", "k": 3}"#).unwrap();
    assert!(!method.is_pairwise());
}
