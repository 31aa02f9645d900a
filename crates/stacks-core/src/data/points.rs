//! Geometric projections: coordinate points and regression observations

use ndarray::{ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use super::*;

/// A single `(x, target)` pair used to train and evaluate regressions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub target: f64,
}

impl Observation {
    pub fn new(x: f64, target: f64) -> Self {
        Self { x, target }
    }
}

impl From<(f64, f64)> for Observation {
    fn from((x, target): (f64, f64)) -> Self {
        Self { x, target }
    }
}

/// Per-field observed range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

/// Records projected onto selected numeric fields
///
/// Row `i` is the coordinate vector of record `i`; columns follow `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    fields: Vec<String>,
    coords: Matrix,
}

impl Points {
    /// Create points from named columns
    pub fn new(fields: Vec<String>, coords: Matrix) -> Result<Self> {
        if fields.len() != coords.ncols() {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} columns", fields.len()),
                actual: format!("{} columns", coords.ncols()),
            });
        }
        Ok(Self { fields, coords })
    }

    /// Create points with generated field names `dim0`, `dim1`, ...
    pub fn unnamed(coords: Matrix) -> Self {
        let fields = (0..coords.ncols()).map(|j| format!("dim{}", j)).collect();
        Self { fields, coords }
    }

    /// Create points from row vectors
    pub fn from_rows(fields: &[&str], rows: &[Vec<f64>]) -> Result<Self> {
        let ncols = fields.len();
        let mut coords = Matrix::zeros((rows.len(), ncols));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != ncols {
                return Err(DataError::DimensionMismatch {
                    expected: format!("{} coordinates", ncols),
                    actual: format!("{} coordinates at row {}", row.len(), i),
                });
            }
            for (j, &v) in row.iter().enumerate() {
                coords[(i, j)] = v;
            }
        }
        Self::new(fields.iter().map(|f| f.to_string()).collect(), coords)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn coords(&self) -> &Matrix {
        &self.coords
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.nrows() == 0
    }

    /// Number of dimensions
    pub fn ndims(&self) -> usize {
        self.coords.ncols()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.coords.row(i)
    }

    /// Observed range of every field
    pub fn bounds(&self) -> FieldBounds {
        let fold = |init: f64, pick: fn(f64, f64) -> f64| -> Vec<f64> {
            self.coords
                .axis_iter(Axis(1))
                .map(|col| col.iter().copied().fold(init, pick))
                .collect()
        };

        FieldBounds {
            min: fold(f64::INFINITY, f64::min),
            max: fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Per-field min-max scaling into `[0, 1]`
    ///
    /// A constant field carries no information and maps to 0.0.
    pub fn min_max_normalize(&self) -> Points {
        let FieldBounds { min, max } = self.bounds();
        let mut scaled = self.coords.clone();

        for (j, mut col) in scaled.axis_iter_mut(Axis(1)).enumerate() {
            let range = max[j] - min[j];
            if range > 0.0 {
                col.mapv_inplace(|v| (v - min[j]) / range);
            } else {
                col.fill(0.0);
            }
        }

        Points {
            fields: self.fields.clone(),
            coords: scaled,
        }
    }

    /// Check the clustering precondition: every coordinate within `[0, 1]`
    pub fn is_unit_scaled(&self) -> bool {
        self.coords.iter().all(|v| (0.0..=1.0).contains(v))
    }

    /// Mean coordinate vector
    pub fn mean(&self) -> Option<FloatArray> {
        self.coords.mean_axis(Axis(0))
    }
}
