//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer derives the quality measures of a converged adjustment:
//! - Residuals, adjusted observations and variance factors
//! - Covariance propagation to unknowns, observations and residuals
//! - Error ellipses of estimated points
//! - The standardized residual test
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Variance factors and covariance propagation.
pub mod precision;

/// Error ellipses.
pub mod ellipse;
