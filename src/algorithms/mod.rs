//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer turns network geometry into the linear system of one
//! Gauss-Newton iteration:
//! - Observation equations (design matrix `A`, misclosure vector `w`)
//! - The diagonal weight matrix `P`
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Design matrix and misclosure vector construction.
pub mod equations;

/// Observation weight matrix.
pub mod weights;
