//! Output types for a completed adjustment.
//!
//! ## Purpose
//!
//! This module defines [`AdjustmentResult`], the data handed to reporting
//! and plotting code: final coordinates, observation vectors, covariance
//! matrices, error ellipses and residual test outcomes.
//!
//! ## Design notes
//!
//! * Plain data with public fields; no reference back into the run.
//! * `Display` prints a compact text report.

use core::fmt::{self, Display, Formatter};

use nalgebra::{DMatrix, DVector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::evaluation::ellipse::ErrorEllipse;
use crate::evaluation::residual_test::ResidualTest;
use crate::primitives::errors::AdjustmentWarning;
use crate::primitives::network::{Network, Point};
use crate::primitives::observation::{Observation, ObservationKind};

/// Result of a network adjustment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdjustmentResult {
    /// Network with adjusted coordinates for the unknown points.
    pub network: Network,
    /// Observations in row order.
    pub observations: Vec<Observation>,
    /// Final unknowns vector `[x0, y0, x1, y1, ...]`.
    pub unknowns: DVector<f64>,
    /// Observed values `l`.
    pub observed: DVector<f64>,
    /// Residuals `r̂`.
    pub residuals: DVector<f64>,
    /// Adjusted observations `l̂ = l + r̂`.
    pub adjusted: DVector<f64>,
    /// Covariance matrix of the unknowns `Ĉx`.
    pub unknowns_covariance: DMatrix<f64>,
    /// Covariance matrix of the adjusted observations `Ĉl`.
    pub observations_covariance: DMatrix<f64>,
    /// Covariance matrix of the residuals `Ĉr`.
    pub residuals_covariance: DMatrix<f64>,
    /// A-priori variance factor `σ0²`.
    pub a_priori_variance: f64,
    /// A-posteriori variance factor `σ̂0²`.
    pub a_posteriori_variance: f64,
    /// Unit variance factor `σ̂0² / σ0²`.
    pub unit_variance: f64,
    /// Degrees of freedom `n - u`.
    pub degrees_of_freedom: usize,
    /// One error ellipse per unknown point, in network order.
    pub ellipses: Vec<ErrorEllipse>,
    /// Standardized residual test outcome per observation.
    pub residual_tests: Vec<ResidualTest>,
    /// Iterations performed.
    pub iterations: usize,
    /// `Σ|δ|` of the final iteration.
    pub deltasum: f64,
    /// Convergence threshold that was applied.
    pub threshold: f64,
    /// Non-fatal conditions met during the run.
    pub warnings: Vec<AdjustmentWarning>,
}

impl AdjustmentResult {
    /// Whether the solver converged before the iteration cap.
    pub fn converged(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, AdjustmentWarning::MaxIterationsReached { .. }))
    }

    /// Adjusted point by name.
    pub fn point(&self, name: &str) -> Option<&Point> {
        self.network.find_point(name).ok()
    }

    /// Error ellipse of an unknown point by name.
    pub fn ellipse(&self, name: &str) -> Option<&ErrorEllipse> {
        self.ellipses.iter().find(|e| e.point == name)
    }

    /// Observations that failed the standardized residual test.
    pub fn failed_observations(&self) -> impl Iterator<Item = &Observation> {
        self.observations
            .iter()
            .zip(&self.residual_tests)
            .filter(|(_, t)| !t.is_pass())
            .map(|(obs, _)| obs)
    }
}

impl Display for AdjustmentResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Points:        {}", self.network.len())?;
        writeln!(f, "  Unknowns:      {}", self.unknowns.len())?;
        writeln!(f, "  Observations:  {}", self.observations.len())?;
        writeln!(f, "  Redundancy:    {}", self.degrees_of_freedom)?;
        writeln!(
            f,
            "  Iterations:    {}{}",
            self.iterations,
            if self.converged() { "" } else { " (not converged)" }
        )?;
        writeln!(f)?;

        writeln!(f, "Variance Factors:")?;
        writeln!(f, "  A-priori:      {:.6}", self.a_priori_variance)?;
        writeln!(f, "  A-posteriori:  {:.6}", self.a_posteriori_variance)?;
        writeln!(f, "  Unit:          {:.6}", self.unit_variance)?;
        writeln!(f)?;

        writeln!(f, "Adjusted Coordinates:")?;
        writeln!(
            f,
            "  {:>8} {:>14} {:>14} {:>10} {:>10} {:>9}",
            "Point", "X", "Y", "Major", "Minor", "Az(deg)"
        )?;
        writeln!(f, "  {}", "-".repeat(70))?;
        for p in self.network.unknown_points() {
            match self.ellipse(&p.name) {
                Some(e) => writeln!(
                    f,
                    "  {:>8} {:>14.4} {:>14.4} {:>10.4} {:>10.4} {:>9.3}",
                    p.name,
                    p.x,
                    p.y,
                    e.semi_major,
                    e.semi_minor,
                    e.orientation.to_degrees()
                )?,
                None => writeln!(f, "  {:>8} {:>14.4} {:>14.4}", p.name, p.x, p.y)?,
            }
        }
        writeln!(f)?;

        writeln!(f, "Observations:")?;
        writeln!(
            f,
            "  {:>8} {:>6} {:>16} {:>16} {:>14} {:>6}",
            "Id", "Kind", "Observed", "Adjusted", "Residual", "Test"
        )?;
        writeln!(f, "  {}", "-".repeat(72))?;
        for (i, obs) in self.observations.iter().enumerate() {
            let kind = match obs.kind {
                ObservationKind::Angle => "Angle",
                ObservationKind::Distance => "Dist",
            };
            let test = match self.residual_tests.get(i) {
                Some(ResidualTest::Pass) => "pass",
                Some(ResidualTest::Fail) => "FAIL",
                None => "-",
            };
            writeln!(
                f,
                "  {:>8} {:>6} {:>16.6} {:>16.6} {:>14.6e} {:>6}",
                obs.id, kind, self.observed[i], self.adjusted[i], self.residuals[i], test
            )?;
        }

        for w in &self.warnings {
            writeln!(f)?;
            writeln!(f, "Warning: {}", w)?;
        }

        Ok(())
    }
}
