//! Elimination-based routines over [`Matrix`]: linear solve, inversion and
//! determinant.
//!
//! All three share one numerical contract: partial pivoting by the largest
//! absolute value in the active column, and a pivot magnitude below
//! [`PIVOT_TOLERANCE`] means the matrix is singular.

use crate::errors::SolveError;
use crate::matrix::Matrix;

/// Pivot magnitudes below this threshold are treated as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Find the row with the largest absolute entry in `col`, at or below `col`.
fn pivot_row(aug: &Matrix, col: usize) -> (usize, f64) {
    let mut pivot_row = col;
    let mut max_val = aug[(col, col)].abs();
    for row in col + 1..aug.rows() {
        let val = aug[(row, col)].abs();
        if val > max_val {
            max_val = val;
            pivot_row = row;
        }
    }
    (pivot_row, max_val)
}

fn swap_rows(aug: &mut Matrix, a: usize, b: usize) {
    if a == b {
        return;
    }
    for j in 0..aug.cols() {
        let tmp = aug[(a, j)];
        aug[(a, j)] = aug[(b, j)];
        aug[(b, j)] = tmp;
    }
}

/// Solve `A * x = b` by Gaussian elimination with partial pivoting.
///
/// # Errors
///
/// Returns [`SolveError::Singular`] naming the offending column when a pivot
/// falls below [`PIVOT_TOLERANCE`]; no partial result is produced.
///
/// # Panics
///
/// Panics when `a` is not square or `b.len() != a.rows()`.
pub fn solve(a: &Matrix, b: &[f64]) -> Result<Vec<f64>, SolveError> {
    assert!(a.is_square(), "matrix must be square");
    assert_eq!(a.rows(), b.len(), "matrix and vector dimensions don't match");

    let n = a.rows();

    // Augmented system [A | b].
    let mut aug = Matrix::zeros(n, n + 1);
    for i in 0..n {
        for j in 0..n {
            aug[(i, j)] = a[(i, j)];
        }
        aug[(i, n)] = b[i];
    }

    // Forward elimination.
    for col in 0..n {
        let (pivot, max_val) = pivot_row(&aug, col);
        if max_val < PIVOT_TOLERANCE {
            return Err(SolveError::Singular { column: col });
        }
        swap_rows(&mut aug, col, pivot);

        for row in col + 1..n {
            let factor = aug[(row, col)] / aug[(col, col)];
            for j in col..=n {
                aug[(row, j)] -= factor * aug[(col, j)];
            }
        }
    }

    // Back substitution.
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = aug[(i, n)];
        for j in i + 1..n {
            sum -= aug[(i, j)] * x[j];
        }
        if aug[(i, i)].abs() < PIVOT_TOLERANCE {
            return Err(SolveError::Singular { column: i });
        }
        x[i] = sum / aug[(i, i)];
    }

    Ok(x)
}

/// Invert a square matrix by Gauss-Jordan elimination on `[A | I]`.
///
/// # Errors
///
/// Returns [`SolveError::Singular`] when a pivot falls below
/// [`PIVOT_TOLERANCE`].
///
/// # Panics
///
/// Panics when `a` is not square.
pub fn invert(a: &Matrix) -> Result<Matrix, SolveError> {
    assert!(a.is_square(), "matrix must be square to invert");

    let n = a.rows();

    // Augmented system [A | I].
    let mut aug = Matrix::zeros(n, 2 * n);
    for i in 0..n {
        for j in 0..n {
            aug[(i, j)] = a[(i, j)];
        }
        aug[(i, n + i)] = 1.0;
    }

    for col in 0..n {
        let (pivot, max_val) = pivot_row(&aug, col);
        if max_val < PIVOT_TOLERANCE {
            return Err(SolveError::Singular { column: col });
        }
        swap_rows(&mut aug, col, pivot);

        let pivot_value = aug[(col, col)];
        for j in 0..2 * n {
            aug[(col, j)] /= pivot_value;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[(row, col)];
            for j in 0..2 * n {
                aug[(row, j)] -= factor * aug[(col, j)];
            }
        }
    }

    // The right-hand block now holds the inverse.
    let mut inverse = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            inverse[(i, j)] = aug[(i, n + j)];
        }
    }
    Ok(inverse)
}

/// Determinant via pivoted elimination with swap-parity tracking.
///
/// Returns exactly `0.0` when a pivot falls below [`PIVOT_TOLERANCE`]; for a
/// stiffness matrix that is a genuine "structure is singular" signal rather
/// than a rounding artefact.
///
/// # Panics
///
/// Panics when `a` is not square.
#[must_use]
pub fn determinant(a: &Matrix) -> f64 {
    assert!(a.is_square(), "matrix must be square");

    let n = a.rows();
    let mut m = a.clone();
    let mut det = 1.0;
    let mut swaps = 0usize;

    for col in 0..n {
        let (pivot, max_val) = pivot_row(&m, col);
        if max_val < PIVOT_TOLERANCE {
            return 0.0;
        }
        if pivot != col {
            swaps += 1;
            swap_rows(&mut m, col, pivot);
        }

        det *= m[(col, col)];

        for row in col + 1..n {
            let factor = m[(row, col)] / m[(col, col)];
            for j in col..n {
                m[(row, j)] -= factor * m[(col, j)];
            }
        }
    }

    if swaps % 2 == 1 {
        det = -det;
    }
    det
}
