//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates an adjustment run:
//! - Input and parameter validation
//! - The Gauss-Newton iteration over an explicit run context
//! - Result assembly
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Iteration loop and run context.
pub mod executor;

/// Result types.
pub mod output;

/// Input validation.
pub mod validator;
