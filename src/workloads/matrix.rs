//! Naive dense matrix multiplication
//!
//! O(n³) triple loop over row-major `f64` buffers. The `k` loop walks `b`
//! column-wise, which keeps the cache miss rate high.

use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Matrix dimension mismatch: {left}x{left} vs {right}x{right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Square matrix stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// All-zero `n x n` matrix
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// `n x n` matrix with entries drawn uniformly from `[0, 1)`
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let data = (0..n * n).map(|_| rng.gen::<f64>()).collect();
        Self { n, data }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// Sum of the diagonal
    pub fn trace(&self) -> f64 {
        (0..self.n).map(|i| self.get(i, i)).sum()
    }
}

/// Compute `c = a * b`, overwriting every element of `c`
pub fn multiply_into(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<(), MatrixError> {
    for other in [b.n, c.n] {
        if other != a.n {
            return Err(MatrixError::DimensionMismatch {
                left: a.n,
                right: other,
            });
        }
    }

    let n = a.n;
    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..n {
                acc += a.data[i * n + k] * b.data[k * n + j];
            }
            c.data[i * n + j] = acc;
        }
    }
    Ok(())
}
