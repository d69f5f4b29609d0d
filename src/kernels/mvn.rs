//! kernels::mvn — symmetric multivariate-normal density and sampling.
//!
//! Purpose
//! -------
//! Evaluate the log-density of the k-dimensional normal law for a (T, k) grid
//! of observations, either with one shared covariance or with one covariance
//! per row (the batched variant required by per-observation skewness), and
//! draw samples via the Cholesky factor.
//!
//! Numerics
//! --------
//! - Densities are computed in log space from the Cholesky factor: the
//!   log-determinant is twice the sum of log-diagonal entries and the
//!   Mahalanobis distance comes from a single forward substitution per row.
//! - Sampling is `μ + L·z` with `z` i.i.d. standard normal.
use crate::kernels::{
    errors::{KernelError, KernelResult},
    linalg::cholesky_lower,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayView3};
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// Forward-substitute `L·y = v` for lower-triangular `L`, accumulating the
/// squared norm of `y` (the Mahalanobis distance of `v`).
fn mahalanobis_sq(l: &Array2<f64>, v: ArrayView1<f64>) -> f64 {
    let k = v.len();
    let mut y = vec![0.0; k];
    for i in 0..k {
        let mut t = v[i];
        for j in 0..i {
            t -= l[(i, j)] * y[j];
        }
        y[i] = t / l[(i, i)];
    }
    y.iter().map(|yi| yi * yi).sum()
}

fn log_det_from_factor(l: &Array2<f64>) -> f64 {
    (0..l.nrows()).map(|i| l[(i, i)].ln()).sum::<f64>() * 2.0
}

fn check_inputs(
    data: ArrayView2<f64>, mean: ArrayView1<f64>, ndim: usize,
) -> KernelResult<()> {
    if mean.len() != ndim {
        return Err(KernelError::MeanLengthMismatch { expected: ndim, actual: mean.len() });
    }
    if data.ncols() != ndim {
        return Err(KernelError::DataWidthMismatch { expected: ndim, actual: data.ncols() });
    }
    Ok(())
}

/// Log-density of `N(mean, cov)` at each row of `data`.
///
/// # Errors
/// - [`KernelError::MeanLengthMismatch`] / [`KernelError::DataWidthMismatch`]
///   on inconsistent shapes.
/// - [`KernelError::NotPositiveDefinite`] if `cov` has no Cholesky factor.
pub fn log_pdf(
    data: ArrayView2<f64>, mean: ArrayView1<f64>, cov: ArrayView2<f64>,
) -> KernelResult<Array1<f64>> {
    let ndim = cov.nrows();
    check_inputs(data, mean, ndim)?;
    let l = cholesky_lower(cov)?;
    let log_norm = -0.5 * (ndim as f64 * (2.0 * PI).ln() + log_det_from_factor(&l));
    let mut out = Array1::zeros(data.nrows());
    for (t, row) in data.rows().into_iter().enumerate() {
        let diff = &row - &mean;
        out[t] = log_norm - 0.5 * mahalanobis_sq(&l, diff.view());
    }
    Ok(out)
}

/// Density of `N(mean, cov)` at each row of `data`.
///
/// Thin wrapper over [`log_pdf`]; prefer the log form inside likelihoods.
pub fn pdf(
    data: ArrayView2<f64>, mean: ArrayView1<f64>, cov: ArrayView2<f64>,
) -> KernelResult<Array1<f64>> {
    Ok(log_pdf(data, mean, cov)?.mapv(f64::exp))
}

/// Log-density with one covariance per observation row.
///
/// `covs` has shape (T, k, k); row `t` of `data` is evaluated under
/// `N(mean, covs[t])`. Each factorization is independent, so a single bad
/// covariance in the stack fails the whole call.
///
/// # Errors
/// Same as [`log_pdf`], plus [`KernelError::BatchLengthMismatch`] when the
/// stack length differs from the number of rows.
pub fn log_pdf_batched(
    data: ArrayView2<f64>, mean: ArrayView1<f64>, covs: ArrayView3<f64>,
) -> KernelResult<Array1<f64>> {
    let ndim = covs.shape()[1];
    check_inputs(data, mean, ndim)?;
    if covs.shape()[0] != data.nrows() {
        return Err(KernelError::BatchLengthMismatch {
            expected: data.nrows(),
            actual: covs.shape()[0],
        });
    }
    let log_two_pi_term = -0.5 * ndim as f64 * (2.0 * PI).ln();
    let mut out = Array1::zeros(data.nrows());
    for (t, row) in data.rows().into_iter().enumerate() {
        let l = cholesky_lower(covs.index_axis(ndarray::Axis(0), t))?;
        let diff = &row - &mean;
        out[t] =
            log_two_pi_term - 0.5 * log_det_from_factor(&l) - 0.5 * mahalanobis_sq(&l, diff.view());
    }
    Ok(out)
}

/// Draw `size` samples from `N(mean, cov)`.
///
/// Returns a (size, k) array, one draw per row, independent across rows.
///
/// # Errors
/// - [`KernelError::MeanLengthMismatch`] on inconsistent shapes.
/// - [`KernelError::NotPositiveDefinite`] if `cov` has no Cholesky factor.
pub fn sample<R: Rng + ?Sized>(
    mean: ArrayView1<f64>, cov: ArrayView2<f64>, size: usize, rng: &mut R,
) -> KernelResult<Array2<f64>> {
    let ndim = cov.nrows();
    if mean.len() != ndim {
        return Err(KernelError::MeanLengthMismatch { expected: ndim, actual: mean.len() });
    }
    let l = cholesky_lower(cov)?;
    let mut out = Array2::zeros((size, ndim));
    for t in 0..size {
        let z: Vec<f64> = (0..ndim).map(|_| rng.sample(StandardNormal)).collect();
        for i in 0..ndim {
            let mut v = mean[i];
            for j in 0..=i {
                v += l[(i, j)] * z[j];
            }
            out[(t, i)] = v;
        }
    }
    Ok(out)
}
