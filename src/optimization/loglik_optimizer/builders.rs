//! loglik_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Small, focused builders for the L-BFGS solvers used by the log-likelihood
//! optimizer. These helpers hide Argmin's generic wiring and apply crate-level
//! options (tolerances, memory size) so that higher-level code can request a
//! configured solver without touching Argmin-specific types.
//!
//! The builders do **not** set an initial parameter vector (`theta0`) or
//! `max_iters`; these are treated as runtime concerns and are applied by the
//! runner (`run_lbfgs`). Errors are always reported via [`OptResult`]; the
//! underlying `argmin::core::Error` values never leak across module
//! boundaries.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::FitOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and wires
/// optional tolerances from `opts.tols` via [`configure_lbfgs`].
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_optimizer_hager_zhang(opts: &FitOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// Same contract as [`build_optimizer_hager_zhang`], with the More–Thuente
/// line-search strategy.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_optimizer_more_thuente(opts: &FitOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver.
///
/// Generic over the line-search type `L` so both builders (and any future
/// variants) can share the tolerance wiring. When a tolerance is `None`, the
/// corresponding `with_tolerance_*` method is not called and Argmin's defaults
/// remain in effect.
///
/// # Errors
/// `OptError` when `with_tolerance_grad` or `with_tolerance_cost` rejects a
/// tolerance.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &FitOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
