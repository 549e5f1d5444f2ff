//! Execution engine for the least-squares adjustment.
//!
//! ## Purpose
//!
//! This module owns the Gauss-Newton iteration: build the observation
//! equations at the current estimate, solve the normal equations for a
//! correction, apply it, and repeat until the correction is negligible or the
//! iteration cap is hit.
//!
//! ## Design notes
//!
//! * All run state lives in an explicit [`AdjustmentContext`]; nothing is
//!   shared between runs.
//! * The equations, correction and `N⁻¹` of the final iteration are returned
//!   untouched. Post-adjustment statistics need `w` at the coordinates
//!   before the last correction, so nothing is rebuilt at the converged point.
//!
//! ## Key concepts
//!
//! * **Execution Loop**: Build (A, w) -> N = AᵗPA, u = AᵗPw -> δ = -N⁻¹u ->
//!   x += δ -> Σ|δ| ≤ threshold?
//! * **Iteration cap**: reaching it is not an error; the current state is
//!   returned with a warning.
//!
//! ## Invariants
//!
//! * The unknowns vector has length `2u` throughout a run.
//! * At most `max_iterations` iterations are performed.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not compute statistics (handled by `evaluation`).

use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};

use crate::algorithms::equations::{EquationBuilder, ObservationEquations};
use crate::algorithms::weights::WeightMatrix;
use crate::math::linalg::{RankDeficiency, invert_normal_matrix};
use crate::primitives::errors::{AdjustmentError, AdjustmentWarning};
use crate::primitives::network::Network;
use crate::primitives::observation::Observation;

// ============================================================================
// Configuration
// ============================================================================

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Solver settings resolved from the builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence bound on `Σ|δ|`.
    pub threshold: f64,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Handling of singular normal equations.
    pub rank_deficiency: RankDeficiency,
}

impl SolverConfig {
    /// Default threshold: half the smallest observation sigma.
    pub fn default_threshold(observations: &[Observation]) -> f64 {
        observations
            .iter()
            .map(|obs| obs.sigma)
            .fold(f64::INFINITY, f64::min)
            / 2.0
    }
}

// ============================================================================
// Context
// ============================================================================

/// Everything one adjustment run owns.
#[derive(Debug, Clone)]
pub struct AdjustmentContext {
    /// Network with approximate coordinates; not mutated.
    pub network: Network,
    /// Observations in row order.
    pub observations: Vec<Observation>,
    /// Current estimate of the unknowns.
    pub unknowns: DVector<f64>,
    /// Observation weights.
    pub weights: WeightMatrix,
}

impl AdjustmentContext {
    /// Create a context with unknowns initialised from the approximate coordinates.
    pub fn new(network: Network, observations: Vec<Observation>, a_priori_variance: f64) -> Self {
        let unknowns = network.unknowns_vector();
        let weights = WeightMatrix::new(&observations, a_priori_variance);
        Self {
            network,
            observations,
            unknowns,
            weights,
        }
    }

    /// Observed values `l` in observation order.
    pub fn observed(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.observations.len(),
            self.observations.iter().map(|obs| obs.value),
        )
    }

    /// Run the solver and store the final estimate in `self.unknowns`.
    pub fn solve(&mut self, config: &SolverConfig) -> Result<SolverOutput, AdjustmentError> {
        let output = solve(
            &self.network,
            &self.observations,
            self.unknowns.clone(),
            &self.weights,
            config,
        )?;
        self.unknowns = output.unknowns.clone();
        Ok(output)
    }
}

// ============================================================================
// Solver
// ============================================================================

/// State of the solver after its last iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutput {
    /// Final estimate of the unknowns.
    pub unknowns: DVector<f64>,
    /// `A` and `w` of the final iteration.
    pub equations: ObservationEquations,
    /// Correction of the final iteration.
    pub delta: DVector<f64>,
    /// `N⁻¹` of the final iteration.
    pub cofactor: DMatrix<f64>,
    /// Iterations performed.
    pub iterations: usize,
    /// `Σ|δ|` of the final iteration.
    pub deltasum: f64,
    /// Set when the iteration cap was hit.
    pub warning: Option<AdjustmentWarning>,
}

impl SolverOutput {
    /// Whether `Σ|δ|` dropped below the threshold.
    #[inline]
    pub fn converged(&self) -> bool {
        self.warning.is_none()
    }
}

/// Iterate the linearised least-squares problem from `x0`.
pub fn solve(
    network: &Network,
    observations: &[Observation],
    x0: DVector<f64>,
    weights: &WeightMatrix,
    config: &SolverConfig,
) -> Result<SolverOutput, AdjustmentError> {
    let builder = EquationBuilder::new(network, observations);
    let mut x = x0;

    // Nothing to estimate: one build for the misclosures, no iteration.
    if x.is_empty() {
        let equations = builder.build(&x)?;
        info!("no unknown points, skipping iteration");
        return Ok(SolverOutput {
            unknowns: x,
            equations,
            delta: DVector::zeros(0),
            cofactor: DMatrix::zeros(0, 0),
            iterations: 0,
            deltasum: 0.0,
            warning: None,
        });
    }

    let mut iteration = 0;
    loop {
        iteration += 1;

        let equations = builder.build(&x)?;
        let (delta, cofactor) = correction(&equations, weights, config.rank_deficiency)
            .ok_or(AdjustmentError::SingularNormalEquations { iteration })?;

        x += &delta;
        let deltasum: f64 = delta.iter().map(|d| d.abs()).sum();
        debug!("iteration {}: deltasum = {:e}", iteration, deltasum);

        if deltasum <= config.threshold {
            info!("converged after {} iterations", iteration);
            return Ok(SolverOutput {
                unknowns: x,
                equations,
                delta,
                cofactor,
                iterations: iteration,
                deltasum,
                warning: None,
            });
        }

        if iteration >= config.max_iterations {
            let warning = AdjustmentWarning::MaxIterationsReached {
                iterations: iteration,
                deltasum,
            };
            warn!("{}", warning);
            return Ok(SolverOutput {
                unknowns: x,
                equations,
                delta,
                cofactor,
                iterations: iteration,
                deltasum,
                warning: Some(warning),
            });
        }
    }
}

/// Solve the normal equations of one iteration.
///
/// Returns `(δ, N⁻¹)` with `δ = -N⁻¹·AᵗPw`, or `None` if `N` is singular.
pub fn correction(
    equations: &ObservationEquations,
    weights: &WeightMatrix,
    policy: RankDeficiency,
) -> Option<(DVector<f64>, DMatrix<f64>)> {
    // P is diagonal, so (PA)ᵗ = AᵗP.
    let at_p = weights.weigh_rows(&equations.design).transpose();
    let normal = &at_p * &equations.design;
    let u = &at_p * &equations.misclosure;

    let cofactor = invert_normal_matrix(&normal, policy)?;
    let delta = -(&cofactor * u);
    Some((delta, cofactor))
}
