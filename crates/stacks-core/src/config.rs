//! Caller-supplied analysis configuration
//!
//! Which keys are numeric and which are categorical is never inferred from the
//! data; the surrounding application states it here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::Dataset;
use crate::error::{Result, StacksError};

/// Field selection and guard rails for one analysis session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Fields treated as numeric metrics
    pub numerical_fields: Vec<String>,
    /// Fields treated as categories
    pub categorical_fields: Vec<String>,
    /// Field holding the record date for time-series extraction
    pub date_field: String,
    /// Regression target; defaults to the first numerical field
    pub target_field: Option<String>,
    /// Largest input accepted by the O(n²) clustering algorithms
    pub max_pairwise_points: usize,
    /// Number of periods to forecast
    pub forecast_horizon: usize,
    /// Seed for randomized initialization; `None` means entropy-seeded
    pub seed: Option<u64>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            numerical_fields: Vec::new(),
            categorical_fields: Vec::new(),
            date_field: "date".to_string(),
            target_field: None,
            max_pairwise_points: 2000,
            forecast_horizon: 30,
            seed: None,
        }
    }
}

impl AnalyticsConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loading analytics config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    /// Set the numerical fields
    pub fn numerical_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numerical_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the categorical fields
    pub fn categorical_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categorical_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the regression target
    pub fn target(mut self, field: impl Into<String>) -> Self {
        self.target_field = Some(field.into());
        self
    }

    /// Fix the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective regression target
    pub fn target_field(&self) -> Option<&str> {
        self.target_field
            .as_deref()
            .or_else(|| self.numerical_fields.first().map(String::as_str))
    }

    /// Check every configured field against the dataset
    pub fn validate(&self, dataset: &Dataset) -> Result<()> {
        self.check()?;

        let named = self
            .numerical_fields
            .iter()
            .chain(&self.categorical_fields)
            .map(String::as_str)
            .chain(self.target_field.as_deref());

        for field in named {
            dataset.require_field(field)?;
        }
        Ok(())
    }

    /// Internal consistency, independent of any dataset
    fn check(&self) -> Result<()> {
        if self.max_pairwise_points == 0 {
            return Err(StacksError::Config(
                "max_pairwise_points must be at least 1".to_string(),
            ));
        }
        if let Some(dup) = self
            .numerical_fields
            .iter()
            .find(|f| self.categorical_fields.contains(f))
        {
            return Err(StacksError::Config(format!(
                "field '{}' is listed as both numerical and categorical",
                dup
            )));
        }
        Ok(())
    }
}
