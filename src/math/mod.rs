//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the adjustment:
//! - Angle directions, normalization and unit conversion
//! - Normal-matrix inversion with a numerical rank check
//!
//! These are reusable building blocks with no adjustment-specific state.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Angle directions, normalization and unit conversion.
pub mod angle;

/// Normal-matrix inversion.
pub mod linalg;
