//! optimization — MLE stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer behind `fit_mle`: an Argmin-backed
//! log-likelihood maximizer with configurable tolerances and line searches,
//! and a single error/result surface. The density layer implements a
//! log-likelihood, chooses tolerances, and obtains fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by minimizing
//!   an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and outcomes are
//!   expressed in terms of `ℓ`.
//! - Parameters and gradients are `ndarray`-based aliases (`Theta`, `Grad`).
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module avoids I/O; the optional `obs_slog` feature attaches a
//!   terminal observer for verbose runs.

pub mod errors;
pub mod loglik_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream code can write
//
//     use multidensity::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
}
