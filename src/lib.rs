//! multidensity — multivariate skewed distributions with MLE fitting.
//!
//! Purpose
//! -------
//! Serve as the crate root for the multivariate density toolkit: the
//! Azzalini–Capitanio skew-normal and the Bauwens–Laurent skew-Student laws,
//! evaluated on (T, k) grids and fitted by maximum likelihood through an
//! Argmin-backed L-BFGS stack.
//!
//! Key behaviors
//! -------------
//! - Expose the distribution layer ([`density`]): the `MultiDensity`
//!   contract, validated data grids, and the two concrete laws with
//!   `pdf`/`cdf`/`rvs`/`fit_mle` surfaces.
//! - Expose the numerical kernels ([`kernels`]): symmetric
//!   multivariate-normal density and sampling, dense SPD linear algebra, and
//!   Genz rectangle probabilities.
//! - Expose the optimization layer ([`optimization`]): log-likelihood
//!   maximization with configurable tolerances and line searches.
//!
//! Conventions
//! -----------
//! - Data grids are (T, k): rows are observations, columns coordinates; a
//!   bare k-vector promotes to a single-row grid.
//! - Likelihood work happens in log space; densities exponentiate only at
//!   the public surface.
//! - Fallible APIs return typed `Result`s; each layer has its own error enum
//!   and lower layers wrap upward at module boundaries.
//!
//! Downstream usage
//! ----------------
//! Most callers only need the prelude:
//!
//! ```ignore
//! use multidensity::prelude::*;
//!
//! let mut law = SkewNormal::standardized(ndarray::array![0.0, 0.0])?;
//! let grid = DataGrid::new(sample)?;
//! let outcome = law.fit_mle(&grid, &FitOptions::default())?;
//! ```
//!
//! Testing notes
//! -------------
//! Unit tests sit next to each module; the end-to-end
//! simulate → fit → evaluate path is covered by the integration tests under
//! `tests/`.

pub mod density;
pub mod kernels;
pub mod optimization;

pub mod prelude {
    pub use crate::density::prelude::*;
    pub use crate::kernels::{KernelError, KernelResult};
    pub use crate::optimization::loglik_optimizer::{
        FitOptions, FitOutcome, LineSearcher, Tolerances,
    };
    pub use crate::optimization::errors::{OptError, OptResult};
}
