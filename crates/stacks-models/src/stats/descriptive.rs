//! Summary statistics of a single numeric field

use serde::{Deserialize, Serialize};

use stacks_core::data::FieldVector;

use super::{mean, population_variance};

/// Summary of a field vector
///
/// Moments are population moments. Quartiles use nearest-rank indexing
/// `sorted[floor(n * q)]` without interpolation, which differs noticeably
/// from interpolated quartiles on small samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population variance
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// Third standardized moment; NaN for a constant field
    pub skewness: f64,
    /// Excess kurtosis; NaN for a constant field
    pub kurtosis: f64,
}

/// Describe a field vector, or `None` when it is empty
pub fn describe(values: &FieldVector) -> Option<Statistics> {
    if values.is_empty() {
        return None;
    }

    let data = values.as_slice();
    let n = data.len();
    let nf = n as f64;
    let sorted = values.sorted();

    let mean = mean(data);
    let variance = population_variance(data);
    let std_dev = variance.sqrt();

    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let q1 = sorted[(nf * 0.25).floor() as usize];
    let q3 = sorted[(nf * 0.75).floor() as usize];

    let central = |power: i32| data.iter().map(|v| (v - mean).powi(power)).sum::<f64>() / nf;
    let skewness = central(3) / std_dev.powi(3);
    let kurtosis = central(4) / variance.powi(2) - 3.0;

    Some(Statistics {
        count: n,
        mean,
        median,
        variance,
        std_dev,
        min: sorted[0],
        max: sorted[n - 1],
        q1,
        q3,
        iqr: q3 - q1,
        skewness,
        kurtosis,
    })
}
