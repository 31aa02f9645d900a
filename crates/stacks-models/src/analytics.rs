//! Configuration-driven entry point
//!
//! [`Analytics`] binds an [`AnalyticsConfig`] to the routines of this crate:
//! field selection, the clustering size guard, the forecast horizon and the
//! random seed all come from the configuration rather than from each call.

use rand::rngs::StdRng;
use rand::SeedableRng;

use stacks_core::data::Dataset;
use stacks_core::AnalyticsConfig;

use crate::batch::{describe_fields, BatchEntry};
use crate::cluster::{ClusterAnalysis, ClusterMethod};
use crate::error::{ModelError, Result};
use crate::regression::{compare_models, ModelComparison, RegressionKind};
use crate::stats::{correlation_matrix, CorrelationCell, Statistics};
use crate::timeseries::{ForecastMethod, ForecastResult, Forecaster};

/// One analysis session over a fixed configuration
#[derive(Debug, Clone)]
pub struct Analytics {
    config: AnalyticsConfig,
    rng: StdRng,
}

impl Analytics {
    /// Bind a configuration, seeding the random source from `config.seed`
    ///
    /// Without a seed the source is drawn from the operating system.
    pub fn new(config: AnalyticsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        log::debug!(
            "analytics session: {} numerical fields, seed {:?}",
            config.numerical_fields.len(),
            config.seed
        );
        Self { config, rng }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Descriptive statistics of every numerical field
    pub fn describe(&self, dataset: &Dataset) -> Vec<BatchEntry<Statistics>> {
        describe_fields(dataset, &self.config.numerical_fields)
    }

    /// Pairwise correlations of the numerical fields
    pub fn correlations(&self, dataset: &Dataset) -> Result<Vec<CorrelationCell>> {
        correlation_matrix(dataset, &self.config.numerical_fields)
    }

    /// Cluster on the numerical fields, guarded by `max_pairwise_points`
    pub fn cluster(&mut self, dataset: &Dataset, method: ClusterMethod) -> Result<ClusterAnalysis> {
        ClusterAnalysis::run(
            dataset,
            &self.config.numerical_fields,
            method,
            self.config.max_pairwise_points,
            &mut self.rng,
        )
    }

    /// Forecast `value_field` by the configured date field and horizon
    pub fn forecast(
        &self,
        dataset: &Dataset,
        value_field: &str,
        method: &ForecastMethod,
    ) -> Result<ForecastResult> {
        let series = dataset.time_series(&self.config.date_field, value_field)?;
        method.forecast(series.values(), self.config.forecast_horizon)
    }

    /// Compare regression families predicting the configured target from `x_field`
    pub fn compare_regressions(
        &self,
        dataset: &Dataset,
        x_field: &str,
        kinds: &[RegressionKind],
        folds: usize,
    ) -> Result<Vec<BatchEntry<ModelComparison>>> {
        let target = self
            .config
            .target_field()
            .ok_or_else(|| ModelError::invalid_config("no regression target configured"))?;
        let data = dataset.observations(x_field, target)?;
        Ok(compare_models(&data, kinds, folds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stacks_core::data::DatasetBuilder;

    fn borrowing() -> Dataset {
        DatasetBuilder::new()
            .with_column("loans", [1.0, 1.2, 0.9, 1.1, 8.0, 8.3, 7.9, 8.1, 4.0, 4.2])
            .unwrap()
            .with_column("renewals", [2.1, 2.5, 1.8, 2.2, 16.0, 16.4, 15.9, 16.3, 8.1, 8.3])
            .unwrap()
            .build()
    }

    fn daily(n: usize) -> Dataset {
        let rows: Vec<serde_json::Value> = (0..n)
            .map(|i| {
                let date = if i < 31 {
                    format!("2024-01-{:02}", i + 1)
                } else {
                    format!("2024-02-{:02}", i - 30)
                };
                serde_json::json!({"date": date, "visits": 100.0 + i as f64})
            })
            .collect();
        serde_json::from_value(serde_json::Value::Array(rows)).unwrap()
    }

    #[test]
    fn test_configured_seed_repeats_assignment() {
        let dataset = borrowing();
        let config = AnalyticsConfig::default()
            .numerical_fields(["loans", "renewals"])
            .seed(7);
        let method = ClusterMethod::KMeans { k: 3 };

        let first = Analytics::new(config.clone()).cluster(&dataset, method).unwrap();
        let second = Analytics::new(config).cluster(&dataset, method).unwrap();
        assert_eq!(first.assignment, second.assignment);

        let mut rng = StdRng::seed_from_u64(7);
        let direct =
            ClusterAnalysis::run(&dataset, &["loans", "renewals"], method, 2000, &mut rng).unwrap();
        assert_eq!(first.assignment, direct.assignment);
    }

    #[test]
    fn test_configured_size_guard() {
        let mut config = AnalyticsConfig::default().numerical_fields(["loans"]).seed(0);
        config.max_pairwise_points = 5;
        let mut analytics = Analytics::new(config);

        let err = analytics
            .cluster(&borrowing(), ClusterMethod::Hierarchical { k: 2 })
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig { .. }));
    }

    #[test]
    fn test_configured_horizon() {
        let mut config = AnalyticsConfig::default();
        config.forecast_horizon = 6;
        let analytics = Analytics::new(config);

        let result = analytics.forecast(&daily(40), "visits", &ForecastMethod::Ar1).unwrap();
        assert_eq!(result.horizon(), 6);
        assert_eq!(result.fitted.len(), 40);
    }

    #[test]
    fn test_compare_regressions_uses_target() {
        let config = AnalyticsConfig::default()
            .numerical_fields(["loans", "renewals"])
            .target("renewals");
        let analytics = Analytics::new(config);

        let entries = analytics
            .compare_regressions(&borrowing(), "loans", &[RegressionKind::Linear], 2)
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_ok());

        let untargeted = Analytics::new(AnalyticsConfig::default());
        let err = untargeted
            .compare_regressions(&borrowing(), "loans", &[RegressionKind::Linear], 2)
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig { .. }));
    }

    #[test]
    fn test_describe_and_correlate_numerical_fields() {
        let analytics = Analytics::new(AnalyticsConfig::default().numerical_fields(["loans", "renewals"]));
        let dataset = borrowing();

        let stats = analytics.describe(&dataset);
        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|e| e.is_ok()));

        let cells = analytics.correlations(&dataset).unwrap();
        assert_eq!(cells.len(), 1);
        assert!(cells[0].coefficient > 0.9);
    }
}
