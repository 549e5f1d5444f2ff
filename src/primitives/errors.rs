//! Error and warning types for network adjustment.
//!
//! ## Purpose
//!
//! This module defines the error taxonomy of an adjustment run. Every
//! variant aborts the run; the only non-fatal condition (hitting the
//! iteration cap) is modelled separately as [`AdjustmentWarning`].
//!
//! ## Design notes
//!
//! * Variants carry the offending identifiers so callers can report them.
//! * `Display` messages are stable and covered by tests.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// AdjustmentError
// ============================================================================

/// Errors raised while building or solving an adjustment.
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustmentError {
    /// An observation's endpoint list does not have the expected length.
    MalformedObservation {
        /// Observation identifier.
        observation: String,
        /// Expected number of endpoints.
        expected: usize,
        /// Number of endpoints found.
        got: usize,
    },

    /// An observation references a point that is not in the network.
    UnresolvedEndpoint {
        /// Observation identifier.
        observation: String,
        /// Missing point name.
        point: String,
    },

    /// An observation kind other than angle or distance.
    UnsupportedObservationType {
        /// Observation identifier.
        observation: String,
        /// Kind as it appeared in the measurement table.
        kind: String,
    },

    /// A known point was used where an unknown point is required.
    NotAnUnknown(String),

    /// No point with the given name exists in the network.
    NotFound(String),

    /// The normal matrix `AᵗPA` is not invertible.
    SingularNormalEquations {
        /// Iteration (1-based) in which the singular system was met.
        iteration: usize,
    },

    /// Degrees of freedom `n - u` are zero or negative.
    InsufficientRedundancy {
        /// Number of observations.
        observations: usize,
        /// Number of unknown parameters.
        unknowns: usize,
    },

    /// Coincident points make an observation's partial derivatives undefined.
    DegenerateGeometry {
        /// Observation identifier.
        observation: String,
    },

    /// No observations were supplied.
    EmptyObservations,

    /// Two points share a name.
    DuplicatePoint(String),

    /// An observation's standard deviation is not strictly positive and finite.
    InvalidSigma {
        /// Observation identifier.
        observation: String,
        /// Offending standard deviation.
        sigma: f64,
    },

    /// A coordinate or observed value is NaN or infinite.
    InvalidNumericValue(String),

    /// Convergence threshold is not strictly positive and finite.
    InvalidThreshold(f64),

    /// Iteration cap out of range.
    InvalidIterations(usize),

    /// A-priori variance factor is not strictly positive and finite.
    InvalidVarianceFactor(f64),

    /// Standardized residual test factor is not strictly positive and finite.
    InvalidOutlierFactor(f64),

    /// A builder parameter was set more than once.
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },
}

impl fmt::Display for AdjustmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedObservation {
                observation,
                expected,
                got,
            } => write!(
                f,
                "Malformed observation '{}': expected {} endpoints, got {}",
                observation, expected, got
            ),
            Self::UnresolvedEndpoint { observation, point } => write!(
                f,
                "Observation '{}' references unknown point '{}'",
                observation, point
            ),
            Self::UnsupportedObservationType { observation, kind } => write!(
                f,
                "Observation '{}' has unsupported type '{}'",
                observation, kind
            ),
            Self::NotAnUnknown(name) => write!(f, "Point '{}' is not an unknown", name),
            Self::NotFound(name) => write!(f, "Point '{}' can not be found in the network", name),
            Self::SingularNormalEquations { iteration } => write!(
                f,
                "Normal equations are singular in iteration {} (network is under-determined)",
                iteration
            ),
            Self::InsufficientRedundancy {
                observations,
                unknowns,
            } => write!(
                f,
                "Insufficient redundancy: {} observations for {} unknowns",
                observations, unknowns
            ),
            Self::DegenerateGeometry { observation } => write!(
                f,
                "Observation '{}' has coincident endpoints",
                observation
            ),
            Self::EmptyObservations => write!(f, "No observations supplied"),
            Self::DuplicatePoint(name) => write!(f, "Duplicate point name '{}'", name),
            Self::InvalidSigma { observation, sigma } => write!(
                f,
                "Invalid sigma for observation '{}': {} (must be > 0 and finite)",
                observation, sigma
            ),
            Self::InvalidNumericValue(msg) => write!(f, "Invalid numeric value: {}", msg),
            Self::InvalidThreshold(t) => {
                write!(f, "Invalid threshold: {} (must be > 0 and finite)", t)
            }
            Self::InvalidIterations(n) => {
                write!(f, "Invalid max_iterations: {} (must be in [1, 10000])", n)
            }
            Self::InvalidVarianceFactor(v) => write!(
                f,
                "Invalid a-priori variance factor: {} (must be > 0 and finite)",
                v
            ),
            Self::InvalidOutlierFactor(k) => {
                write!(f, "Invalid outlier factor: {} (must be > 0 and finite)", k)
            }
            Self::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
        }
    }
}

impl std::error::Error for AdjustmentError {}

// ============================================================================
// AdjustmentWarning
// ============================================================================

/// Non-fatal conditions reported alongside a result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AdjustmentWarning {
    /// The iteration cap was reached before `Σ|δ|` dropped below the threshold.
    MaxIterationsReached {
        /// Iterations performed.
        iterations: usize,
        /// `Σ|δ|` of the last iteration.
        deltasum: f64,
    },
}

impl fmt::Display for AdjustmentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxIterationsReached {
                iterations,
                deltasum,
            } => write!(
                f,
                "Maximum number of iterations reached ({}), last deltasum = {:e}",
                iterations, deltasum
            ),
        }
    }
}
