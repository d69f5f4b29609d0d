//! Errors for the multivariate density layer (data validation, parameter
//! checks, unsupported operations, and fitting failures).
//!
//! This module defines the density error type, [`DensityError`], used across
//! the shared contract and both concrete laws. Kernel-level and
//! optimizer-level failures wrap into it at the module boundary, so callers
//! see a single error surface.
//!
//! ## Conventions
//! - **Indices are 0-based**.
//! - Evaluation grids must be non-empty with finite entries.
//! - `eta` must be **strictly greater than 2** (finite second moments); the
//!   boundary value 2 is rejected, never silently divided by.
//! - Optimizer non-convergence is surfaced as
//!   [`DensityError::FitDidNotConverge`] carrying the last estimate and
//!   objective value so callers may inspect or resume.
use crate::kernels::errors::KernelError;
use crate::optimization::errors::OptError;
use ndarray::Array1;

/// Crate-wide result alias for density operations that may produce
/// [`DensityError`].
pub type DensityResult<T> = Result<T, DensityError>;

/// Unified error type for the density layer.
///
/// Covers input/data validation, parameter checks, unsupported operations,
/// and estimation failures. Implements `Display`/`Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum DensityError {
    // ---- Input/data validation ----
    /// Evaluation grid is empty (no observations).
    MissingData,

    /// A grid entry is NaN/±inf.
    NonFiniteData { row: usize, col: usize, value: f64 },

    /// Grid column count disagrees with the distribution dimension.
    DimensionMismatch { expected: usize, actual: usize },

    /// Per-observation skewness row count disagrees with the grid length.
    SkewRowsMismatch { expected: usize, actual: usize },

    // ---- Parameters ----
    /// Flat parameter vector has the wrong length for this family.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Skewness vector must be non-empty.
    EmptyLambda,

    /// Degrees of freedom must be finite and strictly greater than 2.
    InvalidEta { value: f64, reason: &'static str },

    /// A skewness component violates the family's domain.
    InvalidLambda { index: usize, value: f64, reason: &'static str },

    /// Location vector length disagrees with the distribution dimension.
    LocationLengthMismatch { expected: usize, actual: usize },

    /// The requested operation needs a configuration this instance lacks
    /// (e.g., the skew-normal CDF with per-observation skewness).
    InvalidSkewness { reason: &'static str },

    // ---- Operations ----
    /// The operation is not defined for this distribution family.
    Unsupported { family: &'static str, operation: &'static str },

    // ---- Estimation ----
    /// The optimizer stopped without reporting convergence; carries the last
    /// parameter estimate and attained log-likelihood.
    FitDidNotConverge { theta: Array1<f64>, loglik: f64, status: String },

    // ---- Wrapped layers ----
    /// Wrapper for kernel-level numerical failures.
    Kernel(KernelError),

    /// Wrapper for optimizer-level failures.
    Optimization(OptError),
}

impl std::error::Error for DensityError {}

impl std::fmt::Display for DensityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DensityError::MissingData => {
                write!(f, "No data given: evaluation grid is empty")
            }
            DensityError::NonFiniteData { row, col, value } => {
                write!(f, "Non-finite data at ({row}, {col}): {value}")
            }
            DensityError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected} columns, actual {actual}")
            }
            DensityError::SkewRowsMismatch { expected, actual } => {
                write!(f, "Skewness row mismatch: expected {expected} rows, actual {actual}")
            }
            DensityError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            DensityError::EmptyLambda => {
                write!(f, "Skewness vector must be non-empty")
            }
            DensityError::InvalidEta { value, reason } => {
                write!(f, "Invalid degrees of freedom {value}: {reason}")
            }
            DensityError::InvalidLambda { index, value, reason } => {
                write!(f, "Invalid skewness at index {index}: {value}: {reason}")
            }
            DensityError::LocationLengthMismatch { expected, actual } => {
                write!(f, "Location length mismatch: expected {expected}, actual {actual}")
            }
            DensityError::InvalidSkewness { reason } => {
                write!(f, "Invalid skewness configuration: {reason}")
            }
            DensityError::Unsupported { family, operation } => {
                write!(f, "Operation '{operation}' is not defined for the {family} family")
            }
            DensityError::FitDidNotConverge { theta, loglik, status } => {
                write!(
                    f,
                    "Fit did not converge ({status}): last theta {theta}, log-likelihood {loglik}"
                )
            }
            DensityError::Kernel(err) => {
                write!(f, "Kernel failure: {err}")
            }
            DensityError::Optimization(err) => {
                write!(f, "Optimization failure: {err}")
            }
        }
    }
}

impl From<KernelError> for DensityError {
    fn from(err: KernelError) -> Self {
        DensityError::Kernel(err)
    }
}

impl From<OptError> for DensityError {
    fn from(err: OptError) -> Self {
        DensityError::Optimization(err)
    }
}

/// Density failures seen during an optimizer evaluation become recoverable
/// objective errors, letting the solver reject the candidate theta.
impl From<DensityError> for OptError {
    fn from(err: DensityError) -> Self {
        OptError::EvalFailed { text: err.to_string() }
    }
}
