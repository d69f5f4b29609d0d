//! kernels — symmetric multivariate-normal primitives and linear algebra.
//!
//! Purpose
//! -------
//! Supply the trusted numerical building blocks the skewed laws are derived
//! from: dense symmetric linear algebra for small covariance blocks
//! ([`linalg`]), the symmetric multivariate-normal log-density/sampler with a
//! batched-covariance variant ([`mvn`]), and Genz rectangle probabilities for
//! the skew-normal CDF ([`orthant`]).
//!
//! Conventions
//! -----------
//! - Everything operates on `ndarray` views over `f64`; `nalgebra` is an
//!   implementation detail of [`linalg`] and never crosses this boundary.
//! - Densities are evaluated in log space; callers exponentiate only at the
//!   outermost layer.
//! - Failures surface as [`errors::KernelError`] values; these wrap into the
//!   density layer's error enum at the module boundary above.

pub mod errors;
pub mod linalg;
pub mod mvn;
pub mod orthant;

pub use self::errors::{KernelError, KernelResult};
