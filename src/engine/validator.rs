//! Input validation for adjustment configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for adjustment parameters and
//! input data. It checks observation sigmas, finite values, endpoint counts
//! and parameter bounds before any iteration starts.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not check network connectivity or redundancy; a
//!   datum defect surfaces as singular normal equations.
//! * This module does not resolve endpoint names (done by the equation builder).

use crate::primitives::errors::AdjustmentError;
use crate::primitives::network::Network;
use crate::primitives::observation::Observation;

/// Upper bound on the iteration cap.
pub const MAX_ITERATIONS_LIMIT: usize = 10_000;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for adjustment configuration and input data.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate network coordinates.
    pub fn validate_network(network: &Network) -> Result<(), AdjustmentError> {
        for p in network.points() {
            if !p.x.is_finite() || !p.y.is_finite() {
                return Err(AdjustmentError::InvalidNumericValue(format!(
                    "point '{}' has coordinates ({}, {})",
                    p.name, p.x, p.y
                )));
            }
        }
        Ok(())
    }

    /// Validate observations: non-empty, correct arity, finite values and
    /// strictly positive sigmas.
    pub fn validate_observations(observations: &[Observation]) -> Result<(), AdjustmentError> {
        if observations.is_empty() {
            return Err(AdjustmentError::EmptyObservations);
        }

        for obs in observations {
            obs.check_arity()?;

            if !obs.value.is_finite() {
                return Err(AdjustmentError::InvalidNumericValue(format!(
                    "observation '{}' has value {}",
                    obs.id, obs.value
                )));
            }

            if !obs.sigma.is_finite() || obs.sigma <= 0.0 {
                return Err(AdjustmentError::InvalidSigma {
                    observation: obs.id.clone(),
                    sigma: obs.sigma,
                });
            }
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the convergence threshold.
    pub fn validate_threshold(threshold: f64) -> Result<(), AdjustmentError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(AdjustmentError::InvalidThreshold(threshold));
        }
        Ok(())
    }

    /// Validate the iteration cap.
    ///
    /// # Notes
    ///
    /// * At least one iteration is required to produce a solution.
    /// * Capped at 10000 to prevent runaway computation on divergent networks.
    pub fn validate_iterations(max_iterations: usize) -> Result<(), AdjustmentError> {
        if max_iterations == 0 || max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(AdjustmentError::InvalidIterations(max_iterations));
        }
        Ok(())
    }

    /// Validate the a-priori variance factor.
    pub fn validate_variance_factor(variance: f64) -> Result<(), AdjustmentError> {
        if !variance.is_finite() || variance <= 0.0 {
            return Err(AdjustmentError::InvalidVarianceFactor(variance));
        }
        Ok(())
    }

    /// Validate the standardized residual test factor.
    pub fn validate_outlier_factor(factor: f64) -> Result<(), AdjustmentError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(AdjustmentError::InvalidOutlierFactor(factor));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), AdjustmentError> {
        if let Some(param) = duplicate_param {
            return Err(AdjustmentError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
