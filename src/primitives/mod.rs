//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the fundamental data structures of an adjustment run:
//! - The network model (`Point`, `Role`, `Network`)
//! - Observations and the tables they are loaded from
//! - The error and warning taxonomy
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error and warning types.
pub mod errors;

/// Points and the network model.
pub mod network;

/// Angle and distance observations.
pub mod observation;
