//! High-level API for network adjustment.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the adjustment parameters and the configured
//! [`NetworkAdjustment`] that runs solver and statistics on a network.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called; data
//!   is validated when `.adjust()` is called.
//! * **Stateless**: A built `NetworkAdjustment` can be reused for any number
//!   of networks; each call owns its own run context.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`AdjustmentBuilder`] via `Adjustment::new()`.
//! 2. Chain configuration methods (`.threshold()`, `.max_iterations()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`NetworkAdjustment`].
//! 4. Call `.adjust(&network, &observations)`.

use log::info;

// Internal dependencies
use crate::engine::executor::{AdjustmentContext, DEFAULT_MAX_ITERATIONS, SolverConfig};
use crate::engine::validator::Validator;
use crate::evaluation::ellipse::error_ellipses;
use crate::evaluation::precision::analyze;
use crate::evaluation::residual_test::{DEFAULT_OUTLIER_FACTOR, standardized_residual_test};

// Publicly re-exported types
pub use crate::engine::output::AdjustmentResult;
pub use crate::evaluation::ellipse::ErrorEllipse;
pub use crate::evaluation::residual_test::ResidualTest;
pub use crate::math::angle::{arcseconds_to_radians, dms_to_radians};
pub use crate::math::linalg::RankDeficiency;
pub use crate::primitives::errors::{AdjustmentError, AdjustmentWarning};
pub use crate::primitives::network::{CoordinateRow, Network, Point, Role};
pub use crate::primitives::observation::{MeasurementRow, Observation, ObservationKind};

/// Default a-priori variance factor σ0².
pub const DEFAULT_A_PRIORI_VARIANCE: f64 = 1.0;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a network adjustment.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentBuilder {
    /// A-priori variance factor σ0² (default: 1).
    pub a_priori_variance: Option<f64>,

    /// Convergence bound on `Σ|δ|` (default: half the smallest sigma).
    pub threshold: Option<f64>,

    /// Iteration cap (default: 100).
    pub max_iterations: Option<usize>,

    /// Handling of singular normal equations (default: Fail).
    pub rank_deficiency: Option<RankDeficiency>,

    /// Multiplier of the standardized residual test (default: 3).
    pub outlier_factor: Option<f64>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl AdjustmentBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            a_priori_variance: None,
            threshold: None,
            max_iterations: None,
            rank_deficiency: None,
            outlier_factor: None,
            duplicate_param: None,
        }
    }

    /// Set the a-priori variance factor σ0² used to build the weights.
    pub fn a_priori_variance(mut self, variance: f64) -> Self {
        if self.a_priori_variance.is_some() {
            self.duplicate_param = Some("a_priori_variance");
        }
        self.a_priori_variance = Some(variance);
        self
    }

    /// Set the convergence threshold on the sum of absolute corrections.
    pub fn threshold(mut self, threshold: f64) -> Self {
        if self.threshold.is_some() {
            self.duplicate_param = Some("threshold");
        }
        self.threshold = Some(threshold);
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(iterations);
        self
    }

    /// Set how singular normal equations are handled.
    pub fn rank_deficiency(mut self, policy: RankDeficiency) -> Self {
        if self.rank_deficiency.is_some() {
            self.duplicate_param = Some("rank_deficiency");
        }
        self.rank_deficiency = Some(policy);
        self
    }

    /// Set the multiplier `k` of the test `r̂ > k·σ_r̂`.
    pub fn outlier_factor(mut self, factor: f64) -> Self {
        if self.outlier_factor.is_some() {
            self.duplicate_param = Some("outlier_factor");
        }
        self.outlier_factor = Some(factor);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration.
    pub fn build(self) -> Result<NetworkAdjustment, AdjustmentError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let a_priori_variance = self.a_priori_variance.unwrap_or(DEFAULT_A_PRIORI_VARIANCE);
        Validator::validate_variance_factor(a_priori_variance)?;

        if let Some(threshold) = self.threshold {
            Validator::validate_threshold(threshold)?;
        }

        let max_iterations = self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
        Validator::validate_iterations(max_iterations)?;

        let outlier_factor = self.outlier_factor.unwrap_or(DEFAULT_OUTLIER_FACTOR);
        Validator::validate_outlier_factor(outlier_factor)?;

        Ok(NetworkAdjustment {
            a_priori_variance,
            threshold: self.threshold,
            max_iterations,
            rank_deficiency: self.rank_deficiency.unwrap_or_default(),
            outlier_factor,
        })
    }
}

// ============================================================================
// Network Adjustment
// ============================================================================

/// A validated adjustment configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkAdjustment {
    a_priori_variance: f64,
    threshold: Option<f64>,
    max_iterations: usize,
    rank_deficiency: RankDeficiency,
    outlier_factor: f64,
}

impl NetworkAdjustment {
    /// Adjust `network` to `observations`.
    pub fn adjust(
        &self,
        network: &Network,
        observations: &[Observation],
    ) -> Result<AdjustmentResult, AdjustmentError> {
        Validator::validate_network(network)?;
        Validator::validate_observations(observations)?;

        let threshold = self
            .threshold
            .unwrap_or_else(|| SolverConfig::default_threshold(observations));
        Validator::validate_threshold(threshold)?;

        let config = SolverConfig {
            threshold,
            max_iterations: self.max_iterations,
            rank_deficiency: self.rank_deficiency,
        };

        let mut ctx =
            AdjustmentContext::new(network.clone(), observations.to_vec(), self.a_priori_variance);
        let solution = ctx.solve(&config)?;

        let observed = ctx.observed();
        let precision = analyze(
            &solution.equations,
            &solution.delta,
            &ctx.weights,
            &solution.cofactor,
            &observed,
        )?;
        info!(
            "a-posteriori variance factor {:.6} ({} degrees of freedom)",
            precision.a_posteriori_variance, precision.degrees_of_freedom
        );

        let ellipses = error_ellipses(
            &precision.unknowns_covariance,
            ctx.network.unknown_points().map(|p| p.name.as_str()),
        );
        let residual_tests = standardized_residual_test(
            &precision.residuals,
            &precision.residuals_covariance,
            self.outlier_factor,
        );

        Ok(AdjustmentResult {
            network: ctx.network.with_unknowns(&solution.unknowns),
            observations: ctx.observations,
            unknowns: solution.unknowns,
            observed,
            residuals: precision.residuals,
            adjusted: precision.adjusted,
            unknowns_covariance: precision.unknowns_covariance,
            observations_covariance: precision.observations_covariance,
            residuals_covariance: precision.residuals_covariance,
            a_priori_variance: self.a_priori_variance,
            a_posteriori_variance: precision.a_posteriori_variance,
            unit_variance: precision.unit_variance,
            degrees_of_freedom: precision.degrees_of_freedom,
            ellipses,
            residual_tests,
            iterations: solution.iterations,
            deltasum: solution.deltasum,
            threshold,
            warnings: solution.warning.into_iter().collect(),
        })
    }

    /// Adjust from coordinates and measurement table rows.
    pub fn adjust_tables(
        &self,
        coordinates: &[CoordinateRow],
        measurements: &[MeasurementRow],
    ) -> Result<AdjustmentResult, AdjustmentError> {
        let network = Network::from_rows(coordinates)?;
        let observations = Observation::from_rows(measurements)?;
        self.adjust(&network, &observations)
    }
}
