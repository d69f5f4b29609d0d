//! density::grid — validated evaluation grids.
//!
//! Purpose
//! -------
//! Wrap the (T, k) array of evaluation points every density operation
//! consumes. Construction is the single place emptiness and finiteness are
//! checked, so downstream code can assume a well-formed grid and only verify
//! the column count against its own dimension.
//!
//! Conventions
//! -----------
//! - Rows are observations, columns are coordinates.
//! - A bare vector promotes to a single-row grid, so scalar-style evaluation
//!   at one point and batched evaluation share one code path.
use crate::density::errors::{DensityError, DensityResult};
use ndarray::{Array1, Array2, ArrayView2};

/// A non-empty, all-finite (T, k) grid of evaluation points.
#[derive(Debug, Clone, PartialEq)]
pub struct DataGrid {
    obs: Array2<f64>,
}

impl DataGrid {
    /// Wrap a (T, k) observation matrix.
    ///
    /// # Errors
    /// - [`DensityError::MissingData`] if the matrix has no rows or no columns.
    /// - [`DensityError::NonFiniteData`] at the first NaN/±inf entry.
    pub fn new(obs: Array2<f64>) -> DensityResult<Self> {
        if obs.nrows() == 0 || obs.ncols() == 0 {
            return Err(DensityError::MissingData);
        }
        for ((row, col), &value) in obs.indexed_iter() {
            if !value.is_finite() {
                return Err(DensityError::NonFiniteData { row, col, value });
            }
        }
        Ok(DataGrid { obs })
    }

    /// Promote a single k-dimensional point to a one-row grid.
    ///
    /// # Errors
    /// Same as [`DataGrid::new`].
    pub fn from_point(point: Array1<f64>) -> DensityResult<Self> {
        let k = point.len();
        let obs = point
            .into_shape((1, k))
            .map_err(|_| DensityError::MissingData)?;
        DataGrid::new(obs)
    }

    /// Number of observation rows.
    pub fn nobs(&self) -> usize {
        self.obs.nrows()
    }

    /// Number of coordinates per observation.
    pub fn ndim(&self) -> usize {
        self.obs.ncols()
    }

    /// Borrow the underlying (T, k) matrix.
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.obs.view()
    }

    /// Verify the grid width against a distribution dimension.
    ///
    /// # Errors
    /// [`DensityError::DimensionMismatch`] when the column count differs from
    /// `ndim`.
    pub fn check_width(&self, ndim: usize) -> DensityResult<()> {
        if self.ndim() != ndim {
            return Err(DensityError::DimensionMismatch { expected: ndim, actual: self.ndim() });
        }
        Ok(())
    }
}
