//! loglik_optimizer — MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. The density layer implements a single trait,
//! [`LogLikelihood`], and invokes [`maximize`] to run L-BFGS with a
//! configurable line search, tolerances, and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Convert log-likelihoods `ℓ(θ)` into Argmin-compatible cost functions
//!   `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`].
//! - Expose a single entrypoint [`maximize`] that validates the initial guess
//!   with [`LogLikelihood::check`], selects an L-BFGS solver via [`builders`]
//!   based on [`traits::LineSearcher`], executes it via [`run::run_lbfgs`],
//!   and normalizes results into a [`FitOutcome`].
//! - Centralize optimizer configuration ([`Tolerances`], [`FitOptions`]) and
//!   validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-likelihood `ℓ(θ)` by minimizing
//!   a cost `c(θ) = -ℓ(θ)`; callers implement `ℓ(θ)`, never the cost directly.
//! - [`LogLikelihood::value`] must treat invalid inputs as recoverable
//!   [`crate::optimization::errors::OptError`] values, not panics. For this
//!   crate's densities that means mapping density errors (bad η, bad λ) into
//!   `OptError::EvalFailed` so the solver can reject the candidate θ.
//! - Parameters live in an unconstrained optimizer space as [`Theta`]; any
//!   mapping from constrained model parameters happens in the density layer.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions and FD gradients in
//!   [`adapter`], solver construction in [`builders`], configuration and
//!   outcome invariants in [`traits`], and full toy-objective maximization
//!   in [`api`]. The integration test exercises [`maximize`] end-to-end by
//!   fitting a skewed density.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{FitOptions, FitOutcome, LineSearcher, LogLikelihood, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream code can write
//
//     use multidensity::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{FitOptions, FitOutcome, LineSearcher, LogLikelihood, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
