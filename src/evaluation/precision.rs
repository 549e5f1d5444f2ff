//! Variance factor estimation and covariance propagation.
//!
//! ## Purpose
//!
//! After the solver has converged, this module derives the residuals,
//! adjusted observations, the a-posteriori variance factor and the
//! covariance matrices of unknowns, adjusted observations and residuals.
//!
//! ## Key concepts
//!
//! ```text
//! r̂    = A·δ + w
//! l̂    = l + r̂
//! σ̂0²  = r̂ᵗ·P·r̂ / (n - u)
//! Ĉx   = σ̂0² · N⁻¹
//! Ĉl   = A · Ĉx · Aᵗ
//! Ĉr   = σ̂0² · P⁻¹ - Ĉl
//! ```
//!
//! `A`, `w` and `δ` must be those of the solver's final iteration; `w` is
//! evaluated at the coordinates before the last correction was applied.
//!
//! ## Invariants
//!
//! * Degrees of freedom `n - u` are strictly positive.
//! * `u` counts unknown parameters (columns of `A`), i.e. two per unknown point.

use nalgebra::{DMatrix, DVector};

use crate::algorithms::equations::ObservationEquations;
use crate::algorithms::weights::WeightMatrix;
use crate::primitives::errors::AdjustmentError;

/// Post-adjustment statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Precision {
    /// Residuals `r̂`.
    pub residuals: DVector<f64>,
    /// Adjusted observations `l̂`.
    pub adjusted: DVector<f64>,
    /// Degrees of freedom `n - u`.
    pub degrees_of_freedom: usize,
    /// A-posteriori variance factor `σ̂0²`.
    pub a_posteriori_variance: f64,
    /// Unit variance factor `σ̂0² / σ0²`.
    pub unit_variance: f64,
    /// Covariance matrix of the unknowns `Ĉx`.
    pub unknowns_covariance: DMatrix<f64>,
    /// Covariance matrix of the adjusted observations `Ĉl`.
    pub observations_covariance: DMatrix<f64>,
    /// Covariance matrix of the residuals `Ĉr`.
    pub residuals_covariance: DMatrix<f64>,
}

/// Compute residuals, variance factors and covariances.
///
/// * `equations` - `A` and `w` of the final iteration.
/// * `delta` - correction of the final iteration.
/// * `weights` - the weight matrix `P` used by the solver.
/// * `cofactor` - `N⁻¹` of the final iteration.
/// * `observed` - observed values `l`, in observation order.
pub fn analyze(
    equations: &ObservationEquations,
    delta: &DVector<f64>,
    weights: &WeightMatrix,
    cofactor: &DMatrix<f64>,
    observed: &DVector<f64>,
) -> Result<Precision, AdjustmentError> {
    let design = &equations.design;
    let n = design.nrows();
    let u = design.ncols();

    if n <= u {
        return Err(AdjustmentError::InsufficientRedundancy {
            observations: n,
            unknowns: u,
        });
    }
    let dof = n - u;

    let residuals = design * delta + &equations.misclosure;
    let adjusted = observed + &residuals;

    let a_posteriori_variance = weights.quadratic_form(&residuals) / dof as f64;
    let unit_variance = a_posteriori_variance / weights.a_priori_variance();

    let unknowns_covariance = cofactor * a_posteriori_variance;
    let observations_covariance = design * &unknowns_covariance * design.transpose();
    let residuals_covariance = weights.inverse() * a_posteriori_variance - &observations_covariance;

    Ok(Precision {
        residuals,
        adjusted,
        degrees_of_freedom: dof,
        a_posteriori_variance,
        unit_variance,
        unknowns_covariance,
        observations_covariance,
        residuals_covariance,
    })
}
