//! Angle computation, normalization and unit conversion.
//!
//! ## Purpose
//!
//! This module provides the angular building blocks of the observation
//! equations: directions between points, the normalization rule applied to
//! predicted angles, and conversions from field units to radians.
//!
//! ## Design notes
//!
//! * **Normalization**: predicted angles are brought into `[0, 2π)` by
//!   stepping `π` at a time, not `2π`. A difference of `-10°` therefore
//!   becomes `170°`, not `350°`. Observed angles must follow the same rule.
//!
//! ## Invariants
//!
//! * `normalize_angle` returns a value in `[0, 2π)` for finite input.

use core::f64::consts::PI;

const TWO_PI: f64 = 2.0 * PI;

/// Arcseconds per radian.
const ARCSECONDS_PER_RADIAN: f64 = 180.0 * 3600.0 / PI;

// ============================================================================
// Directions and Normalization
// ============================================================================

/// Direction of the line from `(x0, y0)` to `(x1, y1)`, counter-clockwise
/// from +x, in `(-π, π]`.
#[inline]
pub fn direction(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    (y1 - y0).atan2(x1 - x0)
}

/// Bring `angle` into `[0, 2π)` by adding or subtracting `π` per step.
///
/// # Notes
///
/// * Negative inputs gain `π` until non-negative.
/// * Inputs `≥ 2π` lose `π` until below `2π`.
/// * Non-finite inputs are returned unchanged.
pub fn normalize_angle(mut angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    while angle < 0.0 {
        angle += PI;
    }
    while angle >= TWO_PI {
        angle -= PI;
    }
    angle
}

/// Wrap an axis direction into `[0, π)`.
#[inline]
pub fn wrap_half_turn(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(PI);
    // rem_euclid can round up to exactly π for tiny negative inputs
    if wrapped >= PI { 0.0 } else { wrapped }
}

// ============================================================================
// Unit Conversion
// ============================================================================

/// Convert degrees, minutes and seconds to radians.
///
/// The sign of `degrees` applies to the whole value, so `-10° 30' 0"` is
/// `-10.5°`.
pub fn dms_to_radians(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    let signed = if degrees.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    };
    signed.to_radians()
}

/// Convert arcseconds to radians.
#[inline]
pub fn arcseconds_to_radians(seconds: f64) -> f64 {
    seconds / ARCSECONDS_PER_RADIAN
}

/// Convert radians to arcseconds.
#[inline]
pub fn radians_to_arcseconds(radians: f64) -> f64 {
    radians * ARCSECONDS_PER_RADIAN
}
