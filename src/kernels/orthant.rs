//! kernels::orthant — rectangle probabilities for the multivariate normal.
//!
//! Purpose
//! -------
//! Estimate `P(lower ≤ X ≤ upper)` for a zero-mean multivariate normal with a
//! given correlation matrix. This is the integral behind the skew-normal CDF,
//! which Azzalini's identity expresses as an orthant probability of a
//! bordered (k+1)-dimensional symmetric normal.
//!
//! Method
//! ------
//! Genz's separation-of-variables transformation: factor the correlation
//! matrix as `C·Cᵀ`, map the rectangle onto the unit cube through sequential
//! conditioning (`Φ` and `Φ⁻¹` per coordinate), and average the resulting
//! integrand over a deterministic Richtmyer quasi-random rule. The first
//! coordinate integrates out exactly, so a k-dimensional rectangle costs a
//! (k−1)-dimensional cube average. One dimension short-circuits to the exact
//! `Φ(upper) − Φ(lower)` difference.
//!
//! Accuracy
//! --------
//! With the default [`DEFAULT_QMC_POINTS`] rule the estimate is typically
//! accurate to a few units in the fourth decimal for k ≤ 6, which dominates
//! the truncation error introduced by the finite lower bound used upstream.
use crate::kernels::{
    errors::{KernelError, KernelResult},
    linalg::cholesky_lower,
};
use ndarray::{ArrayView1, ArrayView2};
use statrs::distribution::{ContinuousCDF, Normal};

/// Number of quasi-random points used by [`rectangle_probability`].
pub const DEFAULT_QMC_POINTS: usize = 8000;

/// Clamp an interior cube coordinate away from {0, 1} so `Φ⁻¹` stays finite.
const UNIT_EPS: f64 = 1e-15;

/// First `n` primes; their square roots drive the Richtmyer sequence, one
/// prime per integration dimension beyond the first.
fn first_primes(n: usize) -> Vec<u32> {
    let mut primes: Vec<u32> = Vec::with_capacity(n);
    let mut candidate = 2u32;
    while primes.len() < n {
        if primes.iter().all(|&p| candidate % p != 0) {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}

fn fractional(x: f64) -> f64 {
    x - x.floor()
}

/// Estimate `P(lower ≤ X ≤ upper)` for `X ~ N(0, corr)`.
///
/// `corr` must be a valid correlation matrix (symmetric positive-definite
/// with unit diagonal); bounds must satisfy `lower[i] ≤ upper[i]`.
///
/// Uses `points` quasi-random evaluations; [`DEFAULT_QMC_POINTS`] is the
/// recommended default.
///
/// # Errors
/// - [`KernelError::MatrixShapeMismatch`] on inconsistent shapes.
/// - [`KernelError::InvalidBounds`] if any `lower[i] > upper[i]`.
/// - [`KernelError::NotPositiveDefinite`] if `corr` has no Cholesky factor.
/// - [`KernelError::InvalidNormalParam`] if the standard normal cannot be
///   constructed (never expected in practice).
pub fn rectangle_probability(
    lower: ArrayView1<f64>, upper: ArrayView1<f64>, corr: ArrayView2<f64>, points: usize,
) -> KernelResult<f64> {
    let k = lower.len();
    if upper.len() != k {
        return Err(KernelError::MeanLengthMismatch { expected: k, actual: upper.len() });
    }
    if corr.nrows() != k || corr.ncols() != k {
        return Err(KernelError::MatrixShapeMismatch {
            expected: k,
            rows: corr.nrows(),
            cols: corr.ncols(),
        });
    }
    for i in 0..k {
        if lower[i] > upper[i] {
            return Err(KernelError::InvalidBounds { index: i, lower: lower[i], upper: upper[i] });
        }
    }
    let std_normal = Normal::new(0.0, 1.0)?;
    if k == 1 {
        return Ok(std_normal.cdf(upper[0]) - std_normal.cdf(lower[0]));
    }

    let c = cholesky_lower(corr)?;
    let d1 = std_normal.cdf(lower[0] / c[(0, 0)]);
    let e1 = std_normal.cdf(upper[0] / c[(0, 0)]);

    let sqrt_primes: Vec<f64> =
        first_primes(k - 1).into_iter().map(|p| f64::from(p).sqrt()).collect();
    let mut y = vec![0.0; k - 1];
    let mut acc = 0.0;
    for n in 1..=points {
        let mut d = d1;
        let mut e = e1;
        let mut weight = e1 - d1;
        for i in 1..k {
            let w = fractional(n as f64 * sqrt_primes[i - 1]);
            let z = (d + w * (e - d)).clamp(UNIT_EPS, 1.0 - UNIT_EPS);
            y[i - 1] = std_normal.inverse_cdf(z);
            let shift: f64 = (0..i).map(|j| c[(i, j)] * y[j]).sum();
            d = std_normal.cdf((lower[i] - shift) / c[(i, i)]);
            e = std_normal.cdf((upper[i] - shift) / c[(i, i)]);
            weight *= e - d;
        }
        acc += weight;
    }
    Ok(acc / points as f64)
}
