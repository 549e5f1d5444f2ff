//! # netadjust: Least-Squares Adjustment of 2-D Survey Networks
//!
//! A parametric (Gauss-Newton) least-squares adjustment engine for horizontal
//! survey networks made of angle and distance observations.
//!
//! ## What is a network adjustment?
//!
//! A survey network consists of points, some with fixed ("known") coordinates
//! and some whose coordinates are to be determined ("unknown"), and redundant
//! observations between them. Because the observations contain random errors
//! they never agree exactly; the adjustment finds the unknown coordinates that
//! minimise the weighted sum of squared residuals and reports how precise the
//! result is.
//!
//! **How it works:**
//!
//! 1. Linearise every observation around the current coordinate estimate
//!    (design matrix `A`, misclosure vector `w`)
//! 2. Solve the normal equations `AᵗPA·δ = -AᵗPw` for a correction `δ`
//! 3. Apply the correction and repeat until `Σ|δ|` drops below a threshold
//! 4. Propagate variances: a-posteriori variance factor, covariance matrices of
//!    unknowns, observations and residuals, error ellipses and a standardized
//!    residual test
//!
//! ## Quick Start
//!
//! ```rust
//! use netadjust::prelude::*;
//!
//! let mut network = Network::new();
//! network.push(Point::known("A", 0.0, 0.0))?;
//! network.push(Point::known("B", 100.0, 0.0))?;
//! network.push(Point::known("C", 0.0, 100.0))?;
//! network.push(Point::unknown("P", 40.0, 40.0))?;
//!
//! let observations = vec![
//!     Observation::distance("d1", "A", "P", 70.711, 0.005),
//!     Observation::distance("d2", "B", "P", 70.708, 0.005),
//!     Observation::distance("d3", "C", "P", 70.713, 0.005),
//! ];
//!
//! let model = Adjustment::new()
//!     .max_iterations(20)
//!     .build()?;
//!
//! let result = model.adjust(&network, &observations)?;
//! assert!(result.converged());
//! println!("{}", result);
//! # Result::<(), AdjustmentError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `adjust` returns a `Result<AdjustmentResult, AdjustmentError>`. Every error
//! is a deterministic function of the input data and aborts the run. Hitting the
//! iteration cap is not an error: the result is returned with
//! [`AdjustmentWarning::MaxIterationsReached`](prelude::AdjustmentWarning) in
//! `result.warnings`.
//!
//! ## Parameters
//!
//! | Parameter             | Default                   | Range/Options             | Description                                   |
//! |-----------------------|---------------------------|---------------------------|-----------------------------------------------|
//! | **a_priori_variance** | 1.0                       | (0, ∞)                    | σ0² used to build the weight matrix           |
//! | **threshold**         | half the smallest sigma   | (0, ∞)                    | Convergence bound on `Σ|δ|`                   |
//! | **max_iterations**    | 100                       | [1, 10000]                | Iteration cap                                 |
//! | **rank_deficiency**   | `Fail`                    | `Fail`, `PseudoInverse`   | Handling of singular normal equations         |
//! | **outlier_factor**    | 3.0                       | (0, ∞)                    | Multiplier of the standardized residual test  |
//!
//! ## Units
//!
//! Angles and their standard deviations are radians, distances and coordinates
//! share one linear unit. Use [`dms_to_radians`](prelude::dms_to_radians) and
//! [`arcseconds_to_radians`](prelude::arcseconds_to_radians) to convert field
//! values.
//!
//! ## References
//!
//! - Ghilani, C. D. (2017). "Adjustment Computations: Spatial Data Analysis"
//! - Mikhail, E. M. & Gracie, G. (1981). "Analysis and Adjustment of Survey Measurements"

#![deny(missing_docs)]
// Helpers only reachable through `internals` are unused without `dev`.
#![cfg_attr(not(feature = "dev"), allow(dead_code))]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and error types.
//
// Contains the network model (`Point`, `Network`), observations and the
// error taxonomy.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains angle normalization and conversion, and the nalgebra-backed
// normal-matrix inversion.
mod math;

// Layer 3: Algorithms - observation equations.
//
// Contains the design matrix / misclosure builder and the weight matrix.
mod algorithms;

// Layer 4: Evaluation - post-adjustment statistics.
//
// Contains variance factor estimation, covariance propagation, error
// ellipses and the standardized residual test.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
//
// Contains the Gauss-Newton iteration loop, input validation and result
// assembly.
mod engine;

// High-level fluent API.
//
// Provides the `Adjustment` builder and the configured `NetworkAdjustment`.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use netadjust::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        AdjustmentBuilder as Adjustment, AdjustmentError, AdjustmentResult, AdjustmentWarning,
        CoordinateRow, ErrorEllipse, MeasurementRow, Network, NetworkAdjustment, Observation,
        ObservationKind, Point, RankDeficiency, ResidualTest, Role, arcseconds_to_radians,
        dms_to_radians,
    };
}

// ============================================================================
// Internals
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal observation equation algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal post-adjustment statistics.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
