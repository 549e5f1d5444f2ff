//! Points and the network model.
//!
//! ## Purpose
//!
//! This module holds the in-memory network: an ordered list of named points,
//! each either fixed ([`Role::Known`]) or to be estimated ([`Role::Unknown`]).
//!
//! ## Key concepts
//!
//! * **Unknown ordering**: The k-th unknown point in network order owns slots
//!   `[2k, 2k+1]` of the unknowns vector. Nothing else maps points to vector
//!   positions, so the ordering must not change during a run.
//!
//! ## Invariants
//!
//! * Point names are unique.
//! * The network is never mutated by the solver; estimated coordinates are
//!   written into a copy via [`Network::with_unknowns`].

use nalgebra::DVector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::primitives::errors::AdjustmentError;

// ============================================================================
// Point
// ============================================================================

/// Whether a point's coordinates are fixed or estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// Fixed control point.
    Known,
    /// Point whose coordinates are estimated.
    Unknown,
}

impl Role {
    /// Parse the role column of a coordinates table: `U`/`u` is unknown,
    /// anything else is known.
    pub fn from_code(code: &str) -> Self {
        match code {
            "U" | "u" => Role::Unknown,
            _ => Role::Known,
        }
    }
}

/// A named network point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Unique point name.
    pub name: String,
    /// Fixed or estimated.
    pub role: Role,
    /// Easting (or x) coordinate.
    pub x: f64,
    /// Northing (or y) coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(name: impl Into<String>, role: Role, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            role,
            x,
            y,
        }
    }

    /// Create a fixed control point.
    pub fn known(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(name, Role::Known, x, y)
    }

    /// Create a point to be estimated, with approximate coordinates.
    pub fn unknown(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(name, Role::Unknown, x, y)
    }

    /// Whether this point is estimated.
    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.role == Role::Unknown
    }
}

/// One row of a coordinates table as delivered by a file reader.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoordinateRow {
    /// Point name.
    pub name: String,
    /// Role code (`U`/`u` for unknown).
    pub role: String,
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
}

// ============================================================================
// Network
// ============================================================================

/// Ordered collection of points with name lookup.
///
/// Point names are unique. Deserialization goes through `TryFrom<Vec<Point>>`,
/// which enforces the same check as [`Network::push`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Point>", into = "Vec<Point>"))]
pub struct Network {
    points: Vec<Point>,
}

impl TryFrom<Vec<Point>> for Network {
    type Error = AdjustmentError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let mut network = Self::new();
        for point in points {
            network.push(point)?;
        }
        Ok(network)
    }
}

impl From<Network> for Vec<Point> {
    fn from(network: Network) -> Self {
        network.points
    }
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a network from coordinates table rows, preserving row order.
    pub fn from_rows(rows: &[CoordinateRow]) -> Result<Self, AdjustmentError> {
        let mut network = Self::new();
        for row in rows {
            network.push(Point::new(
                row.name.clone(),
                Role::from_code(&row.role),
                row.x,
                row.y,
            ))?;
        }
        Ok(network)
    }

    /// Append a point. Fails if the name is already taken.
    pub fn push(&mut self, point: Point) -> Result<(), AdjustmentError> {
        if self.points.iter().any(|p| p.name == point.name) {
            return Err(AdjustmentError::DuplicatePoint(point.name));
        }
        self.points.push(point);
        Ok(())
    }

    /// All points in network order.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the network has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Look up a point by name.
    pub fn find_point(&self, name: &str) -> Result<&Point, AdjustmentError> {
        self.points
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AdjustmentError::NotFound(name.to_string()))
    }

    /// Whether `point` is estimated.
    #[inline]
    pub fn is_unknown(&self, point: &Point) -> bool {
        point.is_unknown()
    }

    /// Ordinal of `point` among the unknown points, in network order.
    pub fn unknown_index(&self, point: &Point) -> Result<usize, AdjustmentError> {
        if !point.is_unknown() {
            return Err(AdjustmentError::NotAnUnknown(point.name.clone()));
        }

        let mut count = 0;
        for p in &self.points {
            if p.name == point.name {
                return Ok(count);
            }
            if p.is_unknown() {
                count += 1;
            }
        }

        Err(AdjustmentError::NotFound(point.name.clone()))
    }

    /// Unknown points in network order.
    pub fn unknown_points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|p| p.is_unknown())
    }

    /// Number of unknown points.
    pub fn unknown_count(&self) -> usize {
        self.unknown_points().count()
    }

    /// Initial unknowns vector `[x0, y0, x1, y1, ...]` from the approximate
    /// coordinates of the unknown points.
    pub fn unknowns_vector(&self) -> DVector<f64> {
        let coords: Vec<f64> = self.unknown_points().flat_map(|p| [p.x, p.y]).collect();
        DVector::from_vec(coords)
    }

    /// Copy of the network with unknown coordinates taken from `x`.
    ///
    /// `x` must have length `2 * unknown_count()`.
    pub fn with_unknowns(&self, x: &DVector<f64>) -> Self {
        let mut k = 0;
        let points = self
            .points
            .iter()
            .map(|p| {
                if p.is_unknown() {
                    let updated = Point::new(p.name.clone(), p.role, x[2 * k], x[2 * k + 1]);
                    k += 1;
                    updated
                } else {
                    p.clone()
                }
            })
            .collect();
        Self { points }
    }
}
