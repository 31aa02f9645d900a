//! Tests for regression models, metrics and cross-validation

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use super::*;
use crate::batch::Outcome;
use crate::error::ModelError;
use stacks_core::data::{Dataset, Observation};

// ==================== Test Fixtures ====================

/// y = 2x + 3
fn line_data() -> Vec<Observation> {
    (0..10)
        .map(|i| {
            let x = i as f64;
            Observation::new(x, 2.0 * x + 3.0)
        })
        .collect()
}

/// y = 1 + 0.5x + 2x^2
fn quadratic_data() -> Vec<Observation> {
    (0..9)
        .map(|i| {
            let x = i as f64 - 4.0;
            Observation::new(x, 1.0 + 0.5 * x + 2.0 * x * x)
        })
        .collect()
}

/// y = 1 + 2x + N(0, 0.1)
fn noisy_line(seed: u64) -> Vec<Observation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.1).unwrap();
    (0..100)
        .map(|i| {
            let x = i as f64 * 0.1;
            Observation::new(x, 1.0 + 2.0 * x + noise.sample(&mut rng))
        })
        .collect()
}

// ==================== Linear and polynomial ====================

#[test]
fn test_linear_recovers_exact_line() {
    let model = RegressionKind::Linear.train(&line_data()).unwrap();

    assert_eq!(model.coefficients().len(), 2);
    assert_abs_diff_eq!(model.coefficients()[0], 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(model.coefficients()[1], 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(model.statistics().r_squared.unwrap(), 1.0, epsilon = 1e-9);
    assert_eq!(model.statistics().df_residual, Some(8));
}

#[test]
fn test_identity_records_predict_five() {
    let json = r#"[{"x":1,"y":1},{"x":2,"y":2},{"x":3,"y":3},{"x":4,"y":4}]"#;
    let dataset = Dataset::from_json_str(json).unwrap();
    let observations = dataset.observations("x", "y").unwrap();

    let model = RegressionKind::Linear.train(&observations).unwrap();
    assert_abs_diff_eq!(model.predict(5.0), 5.0, epsilon = 1e-9);
}

#[test]
fn test_polynomial_recovers_quadratic() {
    let model = PolynomialRegression::new(2)
        .unwrap()
        .train(&quadratic_data())
        .unwrap();

    assert_eq!(model.kind(), RegressionKind::Polynomial(2));
    assert_eq!(model.degree(), 2);
    let expected = [1.0, 0.5, 2.0];
    for (b, e) in model.coefficients().iter().zip(expected) {
        assert_abs_diff_eq!(*b, e, epsilon = 1e-8);
    }
    assert_abs_diff_eq!(model.predict(10.0), 206.0, epsilon = 1e-6);
}

#[test]
fn test_polynomial_degree_bounds() {
    assert!(matches!(
        PolynomialRegression::new(0),
        Err(ModelError::InvalidConfig { .. })
    ));
    assert!(matches!(
        PolynomialRegression::new(MAX_POLYNOMIAL_DEGREE + 1),
        Err(ModelError::InvalidConfig { .. })
    ));
    assert!(RegressionKind::Polynomial(7).train(&line_data()).is_err());
}

#[test]
fn test_too_few_observations() {
    let data = vec![Observation::new(1.0, 2.0), Observation::new(2.0, 3.0)];
    let err = RegressionKind::Polynomial(3).train(&data).unwrap_err();
    assert!(err.is_insufficient_data());

    assert!(RegressionKind::Linear.train(&[]).unwrap_err().is_insufficient_data());
}

#[test]
fn test_repeated_x_is_singular() {
    let data: Vec<Observation> = (0..5).map(|i| Observation::new(2.0, i as f64)).collect();
    let model = RegressionKind::Linear.train(&data).unwrap();

    assert!(model.coefficients().iter().all(|b| b.is_nan()));
    assert!(model.predict(1.0).is_nan());
}

#[test]
fn test_noisy_fit() {
    let model = RegressionKind::Linear.train(&noisy_line(42)).unwrap();

    assert_abs_diff_eq!(model.coefficients()[0], 1.0, epsilon = 0.1);
    assert_abs_diff_eq!(model.coefficients()[1], 2.0, epsilon = 0.05);
    assert!(model.statistics().r_squared.unwrap() > 0.99);
    assert!(model.statistics().residual_std_error.unwrap() < 0.2);
}

// ==================== Exponential ====================

#[test]
fn test_exponential_fit() {
    let data: Vec<Observation> = (0..6)
        .map(|i| {
            let x = i as f64;
            Observation::new(x, 2.0 * (0.3 * x).exp())
        })
        .collect();

    let model = ExponentialRegression.train(&data).unwrap();
    assert_eq!(model.link(), Link::Exp);
    assert_abs_diff_eq!(model.coefficients()[0], 2.0_f64.ln(), epsilon = 1e-10);
    assert_abs_diff_eq!(model.coefficients()[1], 0.3, epsilon = 1e-10);
    assert_abs_diff_eq!(model.predict(10.0), 2.0 * 3.0_f64.exp(), epsilon = 1e-8);

    let summary = model.summary();
    assert_eq!(summary.coefficients[0].name, "ln(a)");
    assert!(summary.equation.starts_with("y = exp("));
}

#[test]
fn test_exponential_non_positive_target() {
    let data = vec![
        Observation::new(0.0, 1.0),
        Observation::new(1.0, 0.0),
        Observation::new(2.0, 4.0),
    ];

    let model = RegressionKind::Exponential.train(&data).unwrap();
    assert!(model.predict(1.0).is_nan());
    assert!(model.statistics().r_squared.is_none());
}

// ==================== Metrics and cross-validation ====================

#[test]
fn test_evaluate_metrics() {
    let metrics = evaluate(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).unwrap();

    assert_abs_diff_eq!(metrics.mse, 4.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.mae, 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(metrics.r2, 1.0 - 36.0 / 78.0, epsilon = 1e-12);

    assert!(evaluate(&[1.0], &[1.0, 2.0]).is_err());
    assert!(evaluate(&[], &[]).unwrap_err().is_insufficient_data());
}

#[test]
fn test_cross_validation_on_exact_line() {
    let cv = cross_validate(&line_data(), &RegressionKind::Linear, 5).unwrap();

    assert_eq!(cv.folds.len(), 5);
    assert_abs_diff_eq!(cv.mean.r2, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cv.mean.mse, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cv.std.r2, 0.0, epsilon = 1e-9);
}

#[test]
fn test_cross_validation_depends_on_order() {
    // A line fitted to a parabola extrapolates badly on the outer folds
    let parabola = |x: f64| Observation::new(x, x * x);
    let sorted: Vec<Observation> = (0..10).map(|i| parabola(i as f64)).collect();
    let interleaved: Vec<Observation> = [0, 5, 1, 6, 2, 7, 3, 8, 4, 9]
        .iter()
        .map(|&i| parabola(i as f64))
        .collect();

    let a = cross_validate(&sorted, &RegressionKind::Linear, 5).unwrap();
    let b = cross_validate(&interleaved, &RegressionKind::Linear, 5).unwrap();
    assert!((a.mean.mse - b.mean.mse).abs() > 1.0);

    // Same order, same result
    let again = cross_validate(&sorted, &RegressionKind::Linear, 5).unwrap();
    assert_eq!(a, again);
}

#[test]
fn test_cross_validation_fold_bounds() {
    let data = line_data();
    assert!(matches!(
        cross_validate(&data, &RegressionKind::Linear, 1),
        Err(ModelError::InvalidConfig { .. })
    ));
    assert!(cross_validate(&data, &RegressionKind::Linear, 11)
        .unwrap_err()
        .is_insufficient_data());

    // Last fold takes the remainder
    let cv = cross_validate(&data[..7], &RegressionKind::Linear, 3).unwrap();
    assert_eq!(cv.folds.len(), 3);
}

// ==================== Comparison ====================

#[test]
fn test_compare_models_isolates_failures() {
    let kinds = [
        RegressionKind::Linear,
        RegressionKind::Polynomial(2),
        RegressionKind::Polynomial(9),
    ];
    let entries = compare_models(&line_data(), &kinds, 5);

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].name, "Linear Regression");

    let linear = entries[0].value().unwrap();
    assert_eq!(linear.predictions.len(), 10);
    assert_abs_diff_eq!(linear.predictions[4].predicted, 11.0, epsilon = 1e-9);
    assert_abs_diff_eq!(linear.cross_validation.mean.r2, 1.0, epsilon = 1e-9);

    assert!(entries[1].is_ok());
    assert!(matches!(entries[2].outcome, Outcome::Error { .. }));
}

#[test]
fn test_summary_display() {
    let model = RegressionKind::Linear.train(&line_data()).unwrap();
    let text = model.summary().to_string();

    assert!(text.contains("Model Type: Linear Regression"));
    assert!(text.contains("(Intercept)"));
    assert!(text.contains("R-squared: 1.0000"));
}
