//! Integration tests for the multivariate density pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path: simulate from a law, wrap the draws in a
//!   `DataGrid`, fit by MLE through the shared contract, and evaluate the
//!   fitted law's density and CDF.
//! - Exercise realistic parameter regimes (nonzero skewness, explicit
//!   covariances, heavy tails) rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `density::skew_normal::SkewNormal`:
//!   - Sampling, density, CDF, and skewness recovery by `fit_mle`.
//! - `density::skew_student::SkewStudent`:
//!   - Degrees-of-freedom and skewness recovery on simulated Student data.
//! - `density::contract::MultiDensity`:
//!   - Provided `pdf`/`log_likelihood`/`fit_mle` over both families and the
//!     typed refusal of unsupported operations.
//! - `optimization::loglik_optimizer`:
//!   - LBFGS + line search via `FitOptions` and `Tolerances`, driven through
//!     `fit_mle` with finite-difference gradients.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (Cholesky,
//!   rectangle probabilities, optimizer configuration) — these are covered
//!   by unit tests next to their modules.
//! - Exhaustive accuracy sweeps over dimensions and parameter grids — those
//!   belong in targeted property tests.
use multidensity::prelude::*;
use ndarray::{Array2, Axis, array};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StudentT};

/// Simulated (n, 2) Student-t sample with unit-variance margins and `eta`
/// degrees of freedom; this is the skew-Student law at `lam = (1, 1)`.
fn standardized_student_sample(eta: f64, n: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let t = StudentT::new(eta).unwrap();
    let scale = ((eta - 2.0) / eta).sqrt();
    Array2::from_shape_fn((n, 2), |_| scale * t.sample(&mut rng))
}

// Gradients come from finite differences; on a few thousand observations the
// FD noise floor sits near 1e-4, so pair a realistic gradient tolerance with
// a cost tolerance for clean termination.
fn tight_options() -> FitOptions {
    FitOptions {
        tols: Tolerances::new(Some(1e-4), Some(1e-9), Some(500)).unwrap(),
        line_searcher: LineSearcher::MoreThuente,
        verbose: false,
        lbfgs_mem: None,
    }
}

#[test]
fn skew_normal_fit_recovers_simulated_skewness() {
    let truth = SkewNormal::standardized(array![1.2, -0.6]).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let draws = truth.rvs(3000, &mut rng).unwrap();
    let grid = DataGrid::new(draws).unwrap();

    let mut fitted = SkewNormal::standardized(array![0.0, 0.0]).unwrap();
    let outcome = fitted.fit_mle(&grid, &tight_options()).unwrap();
    assert!(outcome.converged, "status: {}", outcome.status);

    let lam_hat = fitted.theta().unwrap();
    assert!((lam_hat[0] - 1.2).abs() < 0.3, "lam_hat = {lam_hat}");
    assert!((lam_hat[1] + 0.6).abs() < 0.3, "lam_hat = {lam_hat}");

    // The MLE cannot score below the truth on its own sample.
    let ll_hat = fitted.log_likelihood(&grid).unwrap();
    let ll_true = truth.log_likelihood(&grid).unwrap();
    assert!(ll_hat >= ll_true - 1e-6);
}

#[test]
fn skew_normal_cdf_matches_empirical_frequencies() {
    let law = SkewNormal::standardized(array![0.9, 0.4]).unwrap();
    let mut rng = StdRng::seed_from_u64(23);
    let draws = law.rvs(40_000, &mut rng).unwrap();

    let point = [0.3, -0.2];
    let empirical = draws
        .rows()
        .into_iter()
        .filter(|row| row[0] <= point[0] && row[1] <= point[1])
        .count() as f64
        / draws.nrows() as f64;

    let grid = DataGrid::new(array![[point[0], point[1]]]).unwrap();
    let f = law.cdf(&grid).unwrap();
    assert!((f[0] - empirical).abs() < 0.02, "cdf {} vs empirical {empirical}", f[0]);
}

#[test]
fn skew_normal_pipeline_with_explicit_moments() {
    let mu = array![0.5, -1.0];
    let sigma = array![[2.0, 0.5], [0.5, 1.0]];
    let law = SkewNormal::new(
        array![0.8, 0.3],
        Location::Explicit(mu),
        Scale::Explicit(sigma),
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    let draws = law.rvs(2000, &mut rng).unwrap();
    let grid = DataGrid::new(draws).unwrap();

    let log_p = law.log_pdf(&grid).unwrap();
    assert!(log_p.iter().all(|v| v.is_finite()));
    let ll = law.log_likelihood(&grid).unwrap();
    assert!((ll - log_p.sum()).abs() < 1e-9);

    // CDF is monotone along the diagonal through the location.
    let diag = DataGrid::new(array![[-1.0, -2.5], [0.5, -1.0], [2.5, 0.5]]).unwrap();
    let f = law.cdf(&diag).unwrap();
    assert!(f[0] < f[1] && f[1] < f[2]);
}

#[test]
fn skew_student_fit_recovers_simulated_tail_and_symmetry() {
    let sample = standardized_student_sample(6.0, 4000, 17);
    let grid = DataGrid::new(sample).unwrap();

    let mut law = SkewStudent::default();
    let outcome = law.fit_mle(&grid, &tight_options()).unwrap();
    assert!(outcome.converged, "status: {}", outcome.status);

    let eta = law.eta();
    assert!(eta > 3.0 && eta < 12.0, "eta_hat = {eta}");
    for &l in law.lam() {
        assert!((l - 1.0).abs() < 0.2, "lam_hat = {l}");
    }

    // The estimate lands in the domain and round-trips through theta.
    let theta = law.theta().unwrap();
    let mut clone = SkewStudent::default();
    clone.from_theta(&theta).unwrap();
    assert_eq!(clone.theta().unwrap(), theta);
}

#[test]
fn unsupported_operations_are_typed_refusals() {
    let law = SkewStudent::default();
    let grid = DataGrid::new(array![[0.0, 0.0]]).unwrap();
    assert!(matches!(
        law.cdf(&grid),
        Err(DensityError::Unsupported { operation: "cdf", .. })
    ));
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        law.rvs(10, &mut rng),
        Err(DensityError::Unsupported { operation: "rvs", .. })
    ));
}

#[test]
fn both_families_agree_in_their_common_limit() {
    // Large eta with unit skewness approaches the zero-skew normal law.
    let student = SkewStudent::new(400.0, array![1.0, 1.0]).unwrap();
    let normal = SkewNormal::standardized(array![0.0, 0.0]).unwrap();
    let grid = DataGrid::new(array![[0.0, 0.0], [0.7, -0.4], [1.5, 1.5]]).unwrap();
    let p_student = student.pdf(&grid).unwrap();
    let p_normal = normal.pdf(&grid).unwrap();
    for t in 0..grid.nobs() {
        assert!(
            (p_student[t] - p_normal[t]).abs() < 2e-3,
            "row {t}: {} vs {}",
            p_student[t],
            p_normal[t]
        );
    }
}

#[test]
fn cdf_derivative_approximates_the_density() {
    let law = SkewNormal::standardized(array![1.5]).unwrap();
    let x = 0.3;
    let h = 0.05;
    let grid = DataGrid::new(array![[x - h], [x + h], [x]]).unwrap();
    let f = law.cdf(&grid).unwrap();
    let p = law.pdf(&grid).unwrap();
    let slope = (f[1] - f[0]) / (2.0 * h);
    assert!((slope - p[2]).abs() < 0.02, "slope {slope} vs pdf {}", p[2]);
}

#[test]
fn sample_mean_of_centered_law_is_zero() {
    let law = SkewNormal::standardized(array![2.0, -1.0]).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let draws = law.rvs(50_000, &mut rng).unwrap();
    let mean = draws.mean_axis(Axis(0)).unwrap();
    assert!(mean[0].abs() < 0.02, "mean = {mean}");
    assert!(mean[1].abs() < 0.02, "mean = {mean}");
}
