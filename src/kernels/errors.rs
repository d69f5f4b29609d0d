//! Errors for the numerical kernel layer (linear algebra, multivariate-normal
//! evaluation and sampling, rectangle probabilities).
//!
//! This module defines [`KernelError`], the single failure surface of the
//! low-level primitives. The density layer wraps it into its own error type
//! at the module boundary.
//!
//! ## Conventions
//! - **Indices are 0-based**.
//! - Shape variants report the expected dimension alongside what was found.
//! - `statrs` distribution-construction failures are wrapped, not re-exported.
use statrs::distribution::NormalError;

/// Result alias for kernel-level numerical primitives.
pub type KernelResult<T> = Result<T, KernelError>;

/// Errors raised by the symmetric-kernel primitives (linear algebra,
/// multivariate-normal density/sampling, orthant probabilities).
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    // ---- Linear algebra ----
    /// Matrix must be square with the expected dimension.
    MatrixShapeMismatch { expected: usize, rows: usize, cols: usize },

    /// Matrix must be symmetric within tolerance.
    NotSymmetric { row: usize, col: usize, diff: f64 },

    /// Cholesky factorization failed; the matrix is not positive-definite.
    NotPositiveDefinite { dim: usize },

    /// Diagonal entries of a covariance matrix must be strictly positive.
    NonPositiveDiagonal { index: usize, value: f64 },

    // ---- Evaluation inputs ----
    /// Mean vector length disagrees with the kernel dimension.
    MeanLengthMismatch { expected: usize, actual: usize },

    /// Data column count disagrees with the kernel dimension.
    DataWidthMismatch { expected: usize, actual: usize },

    /// Batched covariance stack length disagrees with the number of rows.
    BatchLengthMismatch { expected: usize, actual: usize },

    /// Integration bounds must satisfy lower <= upper per coordinate.
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    // ---- statrs distribution errors ----
    /// Wrapper for statrs::distribution::NormalError
    InvalidNormalParam,
}

impl std::error::Error for KernelError {}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::MatrixShapeMismatch { expected, rows, cols } => {
                write!(
                    f,
                    "Matrix shape mismatch: expected ({expected}, {expected}), found ({rows}, {cols})"
                )
            }
            KernelError::NotSymmetric { row, col, diff } => {
                write!(f, "Matrix not symmetric at ({row}, {col}): off-diagonal gap {diff}")
            }
            KernelError::NotPositiveDefinite { dim } => {
                write!(f, "Cholesky failed: {dim}x{dim} matrix is not positive-definite")
            }
            KernelError::NonPositiveDiagonal { index, value } => {
                write!(f, "Covariance diagonal at index {index} is {value}, must be > 0")
            }
            KernelError::MeanLengthMismatch { expected, actual } => {
                write!(f, "Mean length mismatch: expected {expected}, actual {actual}")
            }
            KernelError::DataWidthMismatch { expected, actual } => {
                write!(f, "Data width mismatch: expected {expected} columns, actual {actual}")
            }
            KernelError::BatchLengthMismatch { expected, actual } => {
                write!(f, "Covariance batch length mismatch: expected {expected}, actual {actual}")
            }
            KernelError::InvalidBounds { index, lower, upper } => {
                write!(f, "Invalid bounds at index {index}: lower {lower} > upper {upper}")
            }
            KernelError::InvalidNormalParam => {
                write!(f, "Invalid standard normal parameters")
            }
        }
    }
}

impl From<NormalError> for KernelError {
    fn from(_err: NormalError) -> Self {
        KernelError::InvalidNormalParam
    }
}
