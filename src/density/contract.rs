//! density::contract — the shared interface every multivariate law implements.
//!
//! Purpose
//! -------
//! Define [`MultiDensity`], the contract tying a distribution family to the
//! fitting machinery: flat-parameter round-tripping (`from_theta` / `theta`),
//! density evaluation, and a provided `fit_mle` that drives the L-BFGS
//! maximizer over the family's log-likelihood.
//!
//! Key behaviors
//! -------------
//! - `pdf` and `log_likelihood` have default implementations in terms of
//!   `log_pdf`, so a family only supplies its log-density.
//! - `cdf` defaults to an [`DensityError::Unsupported`] refusal; families with
//!   a tractable CDF override it.
//! - `fit_mle` clones the receiver per candidate `θ`, reparameterizes the
//!   clone, and evaluates its log-likelihood. Parameter objects are small
//!   (O(k²)), so the clone is cheaper than interior mutability.
//!
//! Conventions
//! -----------
//! - `theta` is always a flat `Array1<f64>` in the family's documented order.
//! - `fit_mle` mutates the receiver **only on convergence**; a failed fit
//!   leaves the distribution's parameters untouched.
//!
//! Downstream usage
//! ----------------
//! [`crate::density::skew_normal::SkewNormal`] and
//! [`crate::density::skew_student::SkewStudent`] are the two implementors.
use crate::density::{
    errors::{DensityError, DensityResult},
    grid::DataGrid,
};
use crate::optimization::loglik_optimizer::{
    Cost, FitOptions, FitOutcome, LogLikelihood, Theta, maximize,
};
use ndarray::{Array1, Array2};
use rand::Rng;

/// Contract shared by the multivariate skewed laws.
///
/// A family provides its dimension, its flat-parameter mapping, and its
/// log-density; everything else (plain density, likelihood, MLE fitting)
/// comes for free through the provided methods.
pub trait MultiDensity: Clone {
    /// Human-readable family name used in error messages.
    fn name(&self) -> &'static str;

    /// Dimension `k` of the law.
    fn ndim(&self) -> usize;

    /// Reparameterize in place from a flat parameter vector, validating the
    /// family's domain constraints.
    ///
    /// # Errors
    /// [`DensityError::ThetaLengthMismatch`] on a wrong-length vector, plus
    /// any family-specific domain violation.
    fn from_theta(&mut self, theta: &Theta) -> DensityResult<()>;

    /// Current parameters as a flat vector, inverse of [`from_theta`].
    ///
    /// # Errors
    /// Families whose current configuration has no flat representation (e.g.
    /// per-observation skewness) return [`DensityError::Unsupported`].
    ///
    /// [`from_theta`]: MultiDensity::from_theta
    fn theta(&self) -> DensityResult<Theta>;

    /// Neutral starting vector for an MLE run at dimension `ndim`.
    fn theta_start(&self, ndim: usize) -> Theta;

    /// Map natural parameters into the unconstrained optimizer space.
    ///
    /// The solver works on an unconstrained vector; families with a
    /// restricted domain (e.g. `η > 2`, `λ > 0`) override this pair with a
    /// smooth bijection so the line search can never step outside the
    /// domain. The default is the identity.
    fn to_optimizer_space(&self, theta: &Theta) -> Theta {
        theta.clone()
    }

    /// Inverse of [`to_optimizer_space`].
    ///
    /// [`to_optimizer_space`]: MultiDensity::to_optimizer_space
    fn from_optimizer_space(&self, z: &Theta) -> Theta {
        z.clone()
    }

    /// Log-density at each grid row.
    fn log_pdf(&self, data: &DataGrid) -> DensityResult<Array1<f64>>;

    /// Density at each grid row. Prefer [`log_pdf`] inside likelihoods.
    ///
    /// [`log_pdf`]: MultiDensity::log_pdf
    fn pdf(&self, data: &DataGrid) -> DensityResult<Array1<f64>> {
        Ok(self.log_pdf(data)?.mapv(f64::exp))
    }

    /// Joint log-likelihood of the grid: the sum of per-row log-densities.
    fn log_likelihood(&self, data: &DataGrid) -> DensityResult<f64> {
        Ok(self.log_pdf(data)?.sum())
    }

    /// Cumulative distribution at each grid row.
    ///
    /// # Errors
    /// Defaults to [`DensityError::Unsupported`]; families with a tractable
    /// CDF override it.
    fn cdf(&self, _data: &DataGrid) -> DensityResult<Array1<f64>> {
        Err(DensityError::Unsupported { family: self.name(), operation: "cdf" })
    }

    /// Draw `size` samples as a (size, k) array.
    ///
    /// # Errors
    /// Defaults to [`DensityError::Unsupported`]; families with an exact
    /// sampler override it.
    fn rvs<R: Rng + ?Sized>(
        &self, _size: usize, _rng: &mut R,
    ) -> DensityResult<Array2<f64>> {
        Err(DensityError::Unsupported { family: self.name(), operation: "rvs" })
    }

    /// Fit the family's parameters to `data` by maximum likelihood.
    ///
    /// Starts from [`theta_start`], maximizes the log-likelihood with L-BFGS
    /// in the family's optimizer space, and on convergence reparameterizes
    /// `self` at the estimate. The returned outcome reports `theta_hat` in
    /// natural parameters.
    ///
    /// # Errors
    /// - [`DensityError::DimensionMismatch`] if the grid width disagrees with
    ///   the law's dimension.
    /// - [`DensityError::FitDidNotConverge`] carrying the last estimate when
    ///   the solver stops without converging (no termination, iteration cap,
    ///   or solver abort).
    /// - Any optimizer failure, wrapped as [`DensityError::Optimization`].
    ///
    /// [`theta_start`]: MultiDensity::theta_start
    fn fit_mle(&mut self, data: &DataGrid, opts: &FitOptions) -> DensityResult<FitOutcome> {
        data.check_width(self.ndim())?;
        let z0 = self.to_optimizer_space(&self.theta_start(self.ndim()));
        let objective = ThetaObjective { prototype: self };
        let mut outcome = maximize(&objective, z0, data, opts)?;
        outcome.theta_hat = self.from_optimizer_space(&outcome.theta_hat);
        if !outcome.converged {
            return Err(DensityError::FitDidNotConverge {
                theta: outcome.theta_hat,
                loglik: outcome.value,
                status: outcome.status,
            });
        }
        self.from_theta(&outcome.theta_hat)?;
        Ok(outcome)
    }
}

/// Bridge from a [`MultiDensity`] to the optimizer's [`LogLikelihood`] trait.
///
/// Each evaluation clones the prototype, reparameterizes the clone at the
/// candidate `θ`, and evaluates its joint log-likelihood. Domain violations
/// become recoverable objective errors, so the line search backs off instead
/// of aborting the run.
struct ThetaObjective<'a, D: MultiDensity> {
    prototype: &'a D,
}

impl<D: MultiDensity> ThetaObjective<'_, D> {
    fn evaluate(&self, z: &Theta, data: &DataGrid) -> DensityResult<f64> {
        let theta = self.prototype.from_optimizer_space(z);
        let mut candidate = self.prototype.clone();
        candidate.from_theta(&theta)?;
        candidate.log_likelihood(data)
    }
}

impl<D: MultiDensity> LogLikelihood for ThetaObjective<'_, D> {
    type Data = DataGrid;

    fn value(
        &self, theta: &Theta, data: &DataGrid,
    ) -> crate::optimization::errors::OptResult<Cost> {
        Ok(self.evaluate(theta, data)?)
    }

    fn check(
        &self, theta: &Theta, data: &DataGrid,
    ) -> crate::optimization::errors::OptResult<()> {
        self.evaluate(theta, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// Independent-normal toy law with one free mean per coordinate.
    #[derive(Clone)]
    struct DiagonalNormal {
        mean: Array1<f64>,
    }

    impl MultiDensity for DiagonalNormal {
        fn name(&self) -> &'static str {
            "diagonal normal"
        }

        fn ndim(&self) -> usize {
            self.mean.len()
        }

        fn from_theta(&mut self, theta: &Theta) -> DensityResult<()> {
            if theta.len() != self.mean.len() {
                return Err(DensityError::ThetaLengthMismatch {
                    expected: self.mean.len(),
                    actual: theta.len(),
                });
            }
            self.mean = theta.clone();
            Ok(())
        }

        fn theta(&self) -> DensityResult<Theta> {
            Ok(self.mean.clone())
        }

        fn theta_start(&self, ndim: usize) -> Theta {
            Array1::zeros(ndim)
        }

        fn log_pdf(&self, data: &DataGrid) -> DensityResult<Array1<f64>> {
            data.check_width(self.ndim())?;
            let log_norm = -0.5 * self.ndim() as f64 * (2.0 * std::f64::consts::PI).ln();
            let mut out = Array1::zeros(data.nobs());
            for (t, row) in data.view().rows().into_iter().enumerate() {
                let quad: f64 = row
                    .iter()
                    .zip(self.mean.iter())
                    .map(|(x, m)| (x - m) * (x - m))
                    .sum();
                out[t] = log_norm - 0.5 * quad;
            }
            Ok(out)
        }
    }

    #[test]
    fn default_pdf_exponentiates_log_pdf() {
        let law = DiagonalNormal { mean: array![0.0, 0.0] };
        let grid = DataGrid::new(array![[0.0, 0.0]]).unwrap();
        let p = law.pdf(&grid).unwrap();
        assert_abs_diff_eq!(p[0], 1.0 / (2.0 * std::f64::consts::PI), epsilon = 1e-12);
    }

    #[test]
    fn default_log_likelihood_sums_rows() {
        let law = DiagonalNormal { mean: array![0.5, -0.5] };
        let grid = DataGrid::new(array![[0.0, 0.0], [1.0, -1.0]]).unwrap();
        let per_row = law.log_pdf(&grid).unwrap();
        let joint = law.log_likelihood(&grid).unwrap();
        assert_abs_diff_eq!(joint, per_row.sum(), epsilon = 1e-12);
    }

    #[test]
    fn default_cdf_is_unsupported() {
        let law = DiagonalNormal { mean: array![0.0] };
        let grid = DataGrid::new(array![[0.0]]).unwrap();
        assert!(matches!(
            law.cdf(&grid),
            Err(DensityError::Unsupported { operation: "cdf", .. })
        ));
        let mut rng = rand::thread_rng();
        assert!(matches!(
            law.rvs(3, &mut rng),
            Err(DensityError::Unsupported { operation: "rvs", .. })
        ));
    }

    #[test]
    fn fit_mle_recovers_the_sample_mean() {
        let mut law = DiagonalNormal { mean: array![0.0, 0.0] };
        let grid = DataGrid::new(array![
            [1.0, -2.0],
            [1.4, -1.6],
            [0.6, -2.4],
            [1.2, -1.8],
            [0.8, -2.2]
        ])
        .unwrap();
        let outcome = law.fit_mle(&grid, &FitOptions::default()).unwrap();
        assert!(outcome.converged);
        assert_abs_diff_eq!(law.mean[0], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(law.mean[1], -2.0, epsilon = 1e-4);
    }

    #[test]
    fn fit_mle_rejects_wrong_grid_width() {
        let mut law = DiagonalNormal { mean: array![0.0, 0.0] };
        let grid = DataGrid::new(array![[1.0, 2.0, 3.0]]).unwrap();
        assert!(matches!(
            law.fit_mle(&grid, &FitOptions::default()),
            Err(DensityError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }
}
