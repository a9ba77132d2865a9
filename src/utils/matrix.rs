//! Dense matrix and vector helpers
//!
//! [`Matrix`] stores its values row-major in a flat `Vec<f64>`, the same
//! layout used for layer weights elsewhere in the crate. Every operation
//! allocates a fresh output and leaves its inputs untouched; incompatible
//! shapes are reported as [`PlaygroundError::DimensionMismatch`].

use crate::error::{PlaygroundError, Result};

/// Row-major dense matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from flat row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        let len = element_count(rows, cols)?;
        if data.len() != len {
            return Err(PlaygroundError::dimension(
                "Matrix::new",
                format!("{} values for {}x{}", len, rows, cols),
                data.len(),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// # Errors
    ///
    /// `InvalidParameter` when `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; element_count(rows, cols)?],
        })
    }

    pub fn identity(size: usize) -> Result<Self> {
        let mut m = Self::zeros(size, size)?;
        for i in 0..size {
            m.data[i * size + i] = 1.0;
        }
        Ok(m)
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(PlaygroundError::RaggedMatrix {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Element at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.data.chunks_exact(self.cols).map(<[f64]>::to_vec).collect()
    }

    /// Matrix product `self × other`.
    ///
    /// Requires `self.cols == other.rows`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(PlaygroundError::dimension(
                "matrix multiply",
                format!("{} rows in right operand", self.cols),
                format!("{}x{} by {}x{}", self.rows, self.cols, other.rows, other.cols),
            ));
        }

        let mut out = Matrix::zeros(self.rows, other.cols)?;
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                if a == 0.0 {
                    continue;
                }
                let b_row = &other.data[k * other.cols..(k + 1) * other.cols];
                let out_row = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (o, &b) in out_row.iter_mut().zip(b_row) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix {
            rows: self.cols,
            cols: self.rows,
            data: vec![0.0; self.data.len()],
        };
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    fn zip_with(
        &self,
        other: &Matrix,
        operation: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(PlaygroundError::dimension(
                operation,
                format!("{}x{}", self.rows, self.cols),
                format!("{}x{}", other.rows, other.cols),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "matrix add", |a, b| a + b)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "matrix subtract", |a, b| a - b)
    }

    pub fn scale(&self, scalar: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * scalar).collect(),
        }
    }
}

fn check_lengths(operation: &'static str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(PlaygroundError::dimension(operation, a.len(), b.len()));
    }
    Ok(())
}

pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    check_lengths("dot", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Euclidean norm.
pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Scales `v` to unit length. The zero vector is returned unchanged.
pub fn normalize(v: &[f64]) -> Vec<f64> {
    let norm = magnitude(v);
    if norm == 0.0 {
        v.to_vec()
    } else {
        v.iter().map(|x| x / norm).collect()
    }
}

pub fn add_vectors(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_lengths("vector add", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

pub fn subtract_vectors(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_lengths("vector subtract", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

pub fn scale_vector(v: &[f64], scalar: f64) -> Vec<f64> {
    v.iter().map(|x| x * scalar).collect()
}

/// Squared Euclidean distance; used on hot paths where only ordering matters.
pub fn squared_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    check_lengths("squared distance", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum())
}

pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    squared_distance(a, b).map(f64::sqrt)
}

pub fn manhattan_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    check_lengths("manhattan distance", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(PlaygroundError::InvalidParameter {
            name: "rows * cols",
            value: rows as f64 * cols as f64,
            reason: "matrix size overflows",
        })
}
