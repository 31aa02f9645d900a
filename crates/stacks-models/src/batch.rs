//! Failure-isolated execution of several independent computations
//!
//! A dashboard computes many metrics from one dataset. Each computation runs
//! as its own task so that a failure produces one entry describing it while
//! the remaining tasks still run.

use serde::{Deserialize, Serialize};

use stacks_core::data::Dataset;

use crate::error::{ModelError, Result};
use crate::stats::{describe, Statistics};

/// What a single task produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    Value(T),
    /// Not enough observations; render as "no data available"
    NoData { reason: String },
    Error { message: String },
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Outcome::Value(value),
            Err(e) if e.is_insufficient_data() => Outcome::NoData {
                reason: e.to_string(),
            },
            Err(e) => Outcome::Error {
                message: e.to_string(),
            },
        }
    }
}

/// A named task outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry<T> {
    pub name: String,
    pub outcome: Outcome<T>,
}

impl<T> BatchEntry<T> {
    pub fn value(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Value(_))
    }
}

/// Run every task and collect one entry per task, in order
pub fn run_batch<T, I, S, F>(tasks: I) -> Vec<BatchEntry<T>>
where
    I: IntoIterator<Item = (S, F)>,
    S: Into<String>,
    F: FnOnce() -> Result<T>,
{
    tasks
        .into_iter()
        .map(|(name, task)| {
            let name = name.into();
            let outcome = Outcome::from(task());
            match &outcome {
                Outcome::NoData { reason } => log::debug!("{}: {}", name, reason),
                Outcome::Error { message } => log::warn!("{} failed: {}", name, message),
                Outcome::Value(_) => {}
            }
            BatchEntry { name, outcome }
        })
        .collect()
}

/// Descriptive statistics for each field, one entry per field
pub fn describe_fields<S: AsRef<str>>(dataset: &Dataset, fields: &[S]) -> Vec<BatchEntry<Statistics>> {
    run_batch(fields.iter().map(|field| {
        let field = field.as_ref();
        (field.to_string(), move || -> Result<Statistics> {
            let values = dataset.field_vector(field)?;
            describe(&values).ok_or_else(|| ModelError::insufficient("describe", 1, 0))
        })
    }))
}
