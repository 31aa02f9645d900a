//! Descriptive statistics, hypothesis tests and correlation

pub mod correlation;
pub mod descriptive;
pub mod hypothesis;

pub use correlation::{correlation_matrix, pearson, CorrelationCell, CorrelationStrength};
pub use descriptive::{describe, Statistics};
pub use hypothesis::{
    anova_by_category, chi_square_goodness_of_fit, one_way_anova, welch_t_test, EffectMeasure,
    EffectSize, TestKind, TestResult,
};


/// Arithmetic mean; NaN for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divide by n)
pub(crate) fn population_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Sample variance (divide by n - 1)
pub(crate) fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0)
}
