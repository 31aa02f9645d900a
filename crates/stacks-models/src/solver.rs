//! Dense linear least squares
//!
//! Systems here are small (a handful of polynomial or Fourier terms), so the
//! normal equations are solved directly by Gauss-Jordan elimination.

use ndarray::{Array1, Array2, Axis};

use crate::error::{ModelError, Result};

type Matrix = Array2<f64>;
type Vector = Array1<f64>;

/// Pivots below this fraction of the largest entry count as zero
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// Solve `A x = b` with partial pivoting
///
/// A singular system is not an error: every entry of the solution is NaN and
/// a warning is logged.
pub fn solve(a: &Matrix, b: &Vector) -> Result<Vector> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return Err(ModelError::invalid_config(format!(
            "cannot solve a {}x{} system against {} values",
            a.nrows(),
            a.ncols(),
            b.len()
        )));
    }

    let scale = a.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let threshold = SINGULAR_TOLERANCE * scale.max(1.0);

    // Augmented matrix [A | b]
    let mut aug = Matrix::zeros((n, n + 1));
    aug.slice_mut(ndarray::s![.., ..n]).assign(a);
    aug.column_mut(n).assign(b);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| aug[(i, col)].abs().total_cmp(&aug[(j, col)].abs()))
            .unwrap_or(col);
        let pivot = aug[(pivot_row, col)];

        if !(pivot.abs() > threshold) {
            log::warn!("singular system in column {} of {}; solution is undefined", col, n);
            return Ok(Vector::from_elem(n, f64::NAN));
        }

        if pivot_row != col {
            for k in 0..=n {
                aug.swap((col, k), (pivot_row, k));
            }
        }

        aug.row_mut(col).mapv_inplace(|v| v / pivot);
        let pivot_values = aug.row(col).to_owned();

        for (i, mut row) in aug.axis_iter_mut(Axis(0)).enumerate() {
            if i == col {
                continue;
            }
            let factor = row[col];
            if factor != 0.0 {
                row.scaled_add(-factor, &pivot_values);
            }
        }
    }

    Ok(aug.column(n).to_owned())
}

/// Least-squares coefficients of `y ~ X` via the normal equations `X'X b = X'y`
pub fn least_squares(x: &Matrix, y: &Vector) -> Result<Vector> {
    if x.nrows() != y.len() {
        return Err(ModelError::invalid_config(format!(
            "design matrix has {} rows but target has {} values",
            x.nrows(),
            y.len()
        )));
    }

    let xt = x.t();
    solve(&xt.dot(x), &xt.dot(y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_solve_requires_pivoting() {
        // Zero in the leading position
        let a = array![[0.0, 2.0, 1.0], [1.0, 1.0, 0.0], [2.0, 0.0, 3.0]];
        let b = array![5.0, 3.0, 11.0];

        let x = solve(&a, &b).unwrap();
        let back = a.dot(&x);
        for (lhs, rhs) in back.iter().zip(b.iter()) {
            assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_singular_system_yields_nan() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![1.0, 2.0];

        let x = solve(&a, &b).unwrap();
        assert!(x.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_dimension_mismatch_is_config_error() {
        let a = array![[1.0, 0.0], [0.0, 1.0]];
        let b = array![1.0, 2.0, 3.0];
        assert!(matches!(solve(&a, &b), Err(ModelError::InvalidConfig { .. })));
    }

    #[test]
    fn test_least_squares_recovers_line() {
        // y = 3 + 2x
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let y = array![3.0, 5.0, 7.0, 9.0];

        let beta = least_squares(&x, &y).unwrap();
        assert_abs_diff_eq!(beta[0], 3.0, epsilon = 1e-10);
        assert_abs_diff_eq!(beta[1], 2.0, epsilon = 1e-10);
    }
}
