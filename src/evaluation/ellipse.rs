//! Standard error ellipses of estimated points.
//!
//! ## Purpose
//!
//! This module extracts, for every unknown point, the 2×2 block of the
//! unknowns covariance matrix and turns it into an error ellipse: semi-axes
//! from the eigenvalues and orientation from the major-axis eigenvector.
//!
//! ## Design notes
//!
//! * Orientations are axis directions, counter-clockwise from +x, in `[0, π)`.
//! * A circular block (repeated eigenvalues) has no preferred axis; its
//!   orientation is reported as `0`.
//! * Tiny negative eigenvalues from roundoff are clamped to zero.

use nalgebra::{DMatrix, Matrix2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::angle::wrap_half_turn;

/// Relative eigenvalue gap below which a block counts as circular.
const CIRCULAR_TOLERANCE: f64 = 1e-12;

/// Error ellipse of one unknown point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorEllipse {
    /// Point name.
    pub point: String,
    /// Semi-major axis `sqrt(λmax)`.
    pub semi_major: f64,
    /// Semi-minor axis `sqrt(λmin)`.
    pub semi_minor: f64,
    /// Direction of the semi-major axis (radians, `[0, π)`).
    pub orientation: f64,
    /// Direction of the semi-minor axis (radians, `[0, π)`).
    pub minor_orientation: f64,
}

impl ErrorEllipse {
    /// Ellipse of the covariance block `[[c00, c01], [c01, c11]]`.
    pub fn from_covariance(point: impl Into<String>, c00: f64, c01: f64, c11: f64) -> Self {
        let eigen = Matrix2::new(c00, c01, c01, c11).symmetric_eigen();
        let (major_idx, minor_idx) = if eigen.eigenvalues[0] >= eigen.eigenvalues[1] {
            (0, 1)
        } else {
            (1, 0)
        };
        let l_max = eigen.eigenvalues[major_idx];
        let l_min = eigen.eigenvalues[minor_idx];

        let scale = l_max.abs().max(l_min.abs());
        let orientation = if scale == 0.0 || (l_max - l_min) <= CIRCULAR_TOLERANCE * scale {
            0.0
        } else {
            let v = eigen.eigenvectors.column(major_idx);
            wrap_half_turn(v[1].atan2(v[0]))
        };

        Self {
            point: point.into(),
            semi_major: l_max.max(0.0).sqrt(),
            semi_minor: l_min.max(0.0).sqrt(),
            orientation,
            minor_orientation: wrap_half_turn(orientation + core::f64::consts::FRAC_PI_2),
        }
    }

    /// Ellipse with both semi-axes multiplied by `factor` (e.g. `2.4477` for
    /// a 95% confidence region).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            semi_major: self.semi_major * factor,
            semi_minor: self.semi_minor * factor,
            ..self.clone()
        }
    }
}

/// One ellipse per unknown point from the unknowns covariance matrix.
///
/// `names` lists the unknown points in network order; the k-th name uses the
/// block at rows/columns `[2k, 2k+1]`.
pub fn error_ellipses<'a>(
    covariance: &DMatrix<f64>,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<ErrorEllipse> {
    names
        .into_iter()
        .enumerate()
        .take(covariance.nrows() / 2)
        .map(|(k, name)| {
            let i = 2 * k;
            ErrorEllipse::from_covariance(
                name,
                covariance[(i, i)],
                covariance[(i, i + 1)],
                covariance[(i + 1, i + 1)],
            )
        })
        .collect()
}
