//! One-dimensional numeric projection of a dataset field

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Finite-or-infinite numeric values of one field
///
/// NaN never enters a `FieldVector`: every constructor filters it out, so
/// downstream statistics cannot be silently poisoned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldVector(Vec<f64>);

impl FieldVector {
    /// Build from raw values, dropping NaN
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self(values.into_iter().filter(|v| !v.is_nan()).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// Borrow as an ndarray view
    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.0[..])
    }

    /// Arithmetic mean, `None` when empty
    pub fn mean(&self) -> Option<f64> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.iter().sum::<f64>() / self.0.len() as f64)
        }
    }

    /// Values in ascending order
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.0.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for FieldVector {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}

impl From<&[f64]> for FieldVector {
    fn from(values: &[f64]) -> Self {
        Self::from_values(values.iter().copied())
    }
}

impl<const N: usize> From<[f64; N]> for FieldVector {
    fn from(values: [f64; N]) -> Self {
        Self::from_values(values)
    }
}

impl FromIterator<f64> for FieldVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl AsRef<[f64]> for FieldVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
