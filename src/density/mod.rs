//! density — the multivariate skewed laws and their shared contract.
//!
//! Purpose
//! -------
//! Expose the user-facing distribution layer: validated evaluation grids
//! ([`grid`]), the [`contract::MultiDensity`] trait tying a family to the
//! MLE machinery, and the two concrete laws — the Azzalini–Capitanio
//! skew-normal ([`skew_normal`]) and the Bauwens–Laurent skew-Student
//! ([`skew_student`]).
//!
//! Key behaviors
//! -------------
//! - Families supply their log-density and flat-parameter mapping; `pdf`,
//!   `log_likelihood`, and `fit_mle` are provided by the contract.
//! - The skew-normal adds a CDF (bordered-normal rectangle probability) and
//!   an exact sampler; the skew-Student refuses both with a typed error.
//!
//! Conventions
//! -----------
//! - Grids are (T, k): rows are observations, columns coordinates.
//! - All densities evaluate in log space and exponentiate at the surface.
//! - Failures surface as [`errors::DensityError`]; kernel and optimizer
//!   errors wrap into it at this boundary.

pub mod contract;
pub mod errors;
pub mod grid;
pub mod skew_normal;
pub mod skew_student;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream code can write
//
//     use multidensity::density::prelude::*;
//
// to import the distribution surface in a single line.

pub mod prelude {
    pub use super::contract::MultiDensity;
    pub use super::errors::{DensityError, DensityResult};
    pub use super::grid::DataGrid;
    pub use super::skew_normal::{Location, Scale, SkewNormal, Skewness};
    pub use super::skew_student::SkewStudent;
}
