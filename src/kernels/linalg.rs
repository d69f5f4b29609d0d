//! kernels::linalg — dense symmetric linear algebra for small covariance blocks.
//!
//! Purpose
//! -------
//! Bridge between `ndarray` containers and `nalgebra`'s dense factorizations
//! for the k×k blocks this crate works with (k is typically 2–5). Provides
//! Cholesky factors, symmetric positive-definite solves, the
//! covariance→correlation split, and the SPD validation mandated for every
//! user-supplied scale matrix.
//!
//! Conventions
//! -----------
//! - All public entry points take `ndarray` views and return owned `ndarray`
//!   containers; `nalgebra` types never cross module boundaries.
//! - Symmetry is checked against [`SYMMETRY_TOL`] on absolute off-diagonal
//!   gaps; positive-definiteness is certified by a successful Cholesky
//!   factorization.
//! - No caching: factors are recomputed per call. The blocks are small enough
//!   that recomputation is O(k³) with a tiny constant.
use crate::kernels::errors::{KernelError, KernelResult};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Absolute tolerance for symmetry checks on covariance/correlation blocks.
pub const SYMMETRY_TOL: f64 = 1e-8;

/// Copy an `ndarray` matrix into a `nalgebra::DMatrix`.
///
/// Row/column order is preserved; the copy is unavoidable because the two
/// crates do not share storage layouts for views.
pub fn to_dmatrix(a: ArrayView2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[(i, j)])
}

/// Lower-triangular Cholesky factor `L` with `A = L·Lᵀ`.
///
/// # Errors
/// [`KernelError::NotPositiveDefinite`] if the factorization fails.
pub fn cholesky_lower(a: ArrayView2<f64>) -> KernelResult<Array2<f64>> {
    let dim = a.nrows();
    let chol = to_dmatrix(a)
        .cholesky()
        .ok_or(KernelError::NotPositiveDefinite { dim })?;
    let l = chol.l();
    Ok(Array2::from_shape_fn((dim, dim), |(i, j)| l[(i, j)]))
}

/// Solve `A·x = b` for symmetric positive-definite `A` via Cholesky.
///
/// Used for the skew-normal `δ` construction (`ρ·x = λ`).
///
/// # Errors
/// - [`KernelError::MatrixShapeMismatch`] if `A` is not square of `b`'s length.
/// - [`KernelError::NotPositiveDefinite`] if the factorization fails.
pub fn solve_spd(a: ArrayView2<f64>, b: ArrayView1<f64>) -> KernelResult<Array1<f64>> {
    let dim = b.len();
    if a.nrows() != dim || a.ncols() != dim {
        return Err(KernelError::MatrixShapeMismatch {
            expected: dim,
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    let chol = to_dmatrix(a)
        .cholesky()
        .ok_or(KernelError::NotPositiveDefinite { dim })?;
    let rhs = DVector::from_iterator(dim, b.iter().copied());
    let x = chol.solve(&rhs);
    Ok(Array1::from_iter(x.iter().copied()))
}

/// Validate a user-supplied covariance matrix.
///
/// Checks, in order:
/// 1. square with dimension `ndim`,
/// 2. strictly positive diagonal,
/// 3. symmetric within [`SYMMETRY_TOL`],
/// 4. positive-definite (Cholesky succeeds).
///
/// # Errors
/// The first violated rule's [`KernelError`] variant.
pub fn validate_covariance(sigma: ArrayView2<f64>, ndim: usize) -> KernelResult<()> {
    if sigma.nrows() != ndim || sigma.ncols() != ndim {
        return Err(KernelError::MatrixShapeMismatch {
            expected: ndim,
            rows: sigma.nrows(),
            cols: sigma.ncols(),
        });
    }
    for i in 0..ndim {
        if !(sigma[(i, i)] > 0.0) || !sigma[(i, i)].is_finite() {
            return Err(KernelError::NonPositiveDiagonal { index: i, value: sigma[(i, i)] });
        }
    }
    for i in 0..ndim {
        for j in (i + 1)..ndim {
            let diff = (sigma[(i, j)] - sigma[(j, i)]).abs();
            if diff > SYMMETRY_TOL {
                return Err(KernelError::NotSymmetric { row: i, col: j, diff });
            }
        }
    }
    cholesky_lower(sigma).map(|_| ())
}

/// Split a covariance matrix into per-dimension scales and a correlation matrix.
///
/// Returns `(omega, rho)` with `omegaᵢ = √sigmaᵢᵢ` and
/// `rhoᵢⱼ = sigmaᵢⱼ / (omegaᵢ·omegaⱼ)`.
///
/// # Errors
/// [`KernelError::NonPositiveDiagonal`] if any diagonal entry is ≤ 0 or
/// non-finite.
pub fn correlation_parts(sigma: ArrayView2<f64>) -> KernelResult<(Array1<f64>, Array2<f64>)> {
    let ndim = sigma.nrows();
    let mut omega = Array1::zeros(ndim);
    for i in 0..ndim {
        let v = sigma[(i, i)];
        if !(v > 0.0) || !v.is_finite() {
            return Err(KernelError::NonPositiveDiagonal { index: i, value: v });
        }
        omega[i] = v.sqrt();
    }
    let rho = Array2::from_shape_fn((ndim, ndim), |(i, j)| sigma[(i, j)] / (omega[i] * omega[j]));
    Ok((omega, rho))
}
