//! Pearson correlation between numeric fields

use serde::{Deserialize, Serialize};

use stacks_core::data::Dataset;

use super::mean;
use crate::error::{ModelError, Result};

/// Qualitative reading of |r|
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    /// Weak below 0.3, moderate below 0.7, strong otherwise
    ///
    /// NaN reads as weak.
    pub fn from_coefficient(r: f64) -> Self {
        let r = r.abs();
        if r >= 0.7 {
            CorrelationStrength::Strong
        } else if r >= 0.3 {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }
}

/// One upper-triangle entry of a correlation matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationCell {
    pub x_field: String,
    pub y_field: String,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
}

/// Pearson correlation of two equally long samples
///
/// A constant sample has no defined correlation and yields NaN.
pub fn pearson(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ModelError::invalid_config(format!(
            "correlation needs equally long samples, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    if a.len() < 2 {
        return Err(ModelError::insufficient("correlation", 2, a.len()));
    }

    let (ma, mb) = (mean(a), mean(b));
    let (mut cov, mut va, mut vb) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let (dx, dy) = (x - ma, y - mb);
        cov += dx * dy;
        va += dx * dx;
        vb += dy * dy;
    }

    Ok(cov / (va * vb).sqrt())
}

/// Pairwise correlations of `fields`, upper triangle in field order
///
/// Each pair uses the rows where both fields are numeric. A pair sharing
/// fewer than two such rows gets a NaN coefficient; an unknown field is
/// an error.
pub fn correlation_matrix<S: AsRef<str>>(
    dataset: &Dataset,
    fields: &[S],
) -> Result<Vec<CorrelationCell>> {
    let mut cells = Vec::new();

    for (i, x_field) in fields.iter().enumerate() {
        for y_field in &fields[i + 1..] {
            let (x_field, y_field) = (x_field.as_ref(), y_field.as_ref());
            let (xs, ys): (Vec<f64>, Vec<f64>) = dataset
                .observations(x_field, y_field)?
                .into_iter()
                .map(|o| (o.x, o.target))
                .unzip();

            let coefficient = match pearson(&xs, &ys) {
                Ok(r) => r,
                Err(e) if e.is_insufficient_data() => {
                    log::debug!("{} / {}: {}", x_field, y_field, e);
                    f64::NAN
                }
                Err(e) => return Err(e),
            };
            cells.push(CorrelationCell {
                x_field: x_field.to_string(),
                y_field: y_field.to_string(),
                coefficient,
                strength: CorrelationStrength::from_coefficient(coefficient),
            });
        }
    }

    Ok(cells)
}
