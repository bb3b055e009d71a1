//! Dense real-valued matrices for the stiffness solver.
//!
//! Dimension mismatches in these operations are programming errors, not
//! recoverable analysis failures, so they panic via `assert!`.

use std::fmt;
use std::ops::{Index, IndexMut};

/// A dense `rows x cols` matrix of `f64`, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a matrix filled with zeros.
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a matrix with ones on the leading diagonal.
    ///
    /// For rectangular shapes the first `min(rows, cols)` diagonal entries
    /// are set.
    #[must_use]
    pub fn identity(rows: usize, cols: usize) -> Self {
        let mut matrix = Self::zeros(rows, cols);
        for i in 0..rows.min(cols) {
            matrix[(i, i)] = 1.0;
        }
        matrix
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the matrix has as many rows as columns.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Reset every entry to zero.
    pub fn fill_zero(&mut self) {
        self.data.fill(0.0);
    }

    /// Matrix product `self * other`.
    ///
    /// # Panics
    ///
    /// Panics when `self.cols() != other.rows()`.
    #[must_use]
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, other.rows,
            "matrix dimensions incompatible for multiplication"
        );
        let mut result = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self[(i, k)] * other[(k, j)];
                }
                result[(i, j)] = sum;
            }
        }
        result
    }

    /// Matrix-vector product `self * x`.
    ///
    /// # Panics
    ///
    /// Panics when `self.cols() != x.len()`.
    #[must_use]
    pub fn mul_vector(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(
            self.cols,
            x.len(),
            "matrix-vector dimensions incompatible"
        );
        let mut result = vec![0.0; self.rows];
        for i in 0..self.rows {
            let mut sum = 0.0;
            for j in 0..self.cols {
                sum += self[(i, j)] * x[j];
            }
            result[i] = sum;
        }
        result
    }

    /// Elementwise scalar product.
    #[must_use]
    pub fn scale(&self, scalar: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|value| value * scalar).collect(),
        }
    }

    /// Mirrored `cols x rows` copy.
    #[must_use]
    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result[(j, i)] = self[(i, j)];
            }
        }
        result
    }

    /// Largest absolute entry, or zero for an empty matrix.
    ///
    /// Used for diagnostics only; this is not a matrix norm.
    #[must_use]
    pub fn abs_max(&self) -> f64 {
        self.data
            .iter()
            .fold(0.0_f64, |max, value| max.max(value.abs()))
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        &mut self.data[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix ({}x{}):", self.rows, self.cols)?;
        for i in 0..self.rows {
            write!(f, "[ ")?;
            for j in 0..self.cols {
                write!(f, "{:8.3}", self[(i, j)])?;
                if j + 1 < self.cols {
                    write!(f, ", ")?;
                }
            }
            writeln!(f, " ]")?;
        }
        Ok(())
    }
}
