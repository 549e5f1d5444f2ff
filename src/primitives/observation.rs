//! Angle and distance observations.
//!
//! ## Purpose
//!
//! This module defines the strongly typed observation record and its
//! conversion from measurement table rows.
//!
//! ## Key concepts
//!
//! * **Angle**: endpoints are ordered `to`, `at`, `from`; the value is the
//!   angle at `at`, turned counter-clockwise from the `to` line to the
//!   `from` line, in radians.
//! * **Distance**: endpoints are `start`, `end`; the value is the horizontal
//!   distance in the network's linear unit.
//! * **Endpoint list**: tables list endpoints as one `_`-separated string,
//!   e.g. `B_A_C`.
//!
//! ## Invariants
//!
//! * Observations are immutable once built.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::primitives::errors::AdjustmentError;

/// Separator between point names in a measurement table endpoint list.
pub const ENDPOINT_SEPARATOR: char = '_';

// ============================================================================
// ObservationKind
// ============================================================================

/// Supported observation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObservationKind {
    /// Horizontal angle (to / at / from).
    Angle,
    /// Horizontal distance (start / end).
    Distance,
}

impl ObservationKind {
    /// Number of endpoints this kind references.
    #[inline]
    pub fn endpoint_count(self) -> usize {
        match self {
            ObservationKind::Angle => 3,
            ObservationKind::Distance => 2,
        }
    }

    /// Parse the kind column of a measurement table (`Angle` or `Dist`).
    pub fn from_code(observation: &str, code: &str) -> Result<Self, AdjustmentError> {
        match code {
            "Angle" => Ok(ObservationKind::Angle),
            "Dist" => Ok(ObservationKind::Distance),
            other => Err(AdjustmentError::UnsupportedObservationType {
                observation: observation.to_string(),
                kind: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Observation
// ============================================================================

/// A single measurement between network points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Observation identifier.
    pub id: String,
    /// Angle or distance.
    pub kind: ObservationKind,
    /// Point names; `[to, at, from]` for angles, `[start, end]` for distances.
    pub endpoints: Vec<String>,
    /// Observed value (radians or linear units).
    pub value: f64,
    /// Standard deviation, same unit as `value`.
    pub sigma: f64,
}

impl Observation {
    /// Create an angle observation at `at`, from the `to` line to the `from` line.
    pub fn angle(
        id: impl Into<String>,
        to: impl Into<String>,
        at: impl Into<String>,
        from: impl Into<String>,
        value: f64,
        sigma: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ObservationKind::Angle,
            endpoints: vec![to.into(), at.into(), from.into()],
            value,
            sigma,
        }
    }

    /// Create a distance observation between `start` and `end`.
    pub fn distance(
        id: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        value: f64,
        sigma: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ObservationKind::Distance,
            endpoints: vec![start.into(), end.into()],
            value,
            sigma,
        }
    }

    /// Build an observation from a measurement table row.
    ///
    /// The endpoint list must split into exactly as many names as the kind
    /// requires.
    pub fn from_row(row: &MeasurementRow) -> Result<Self, AdjustmentError> {
        let kind = ObservationKind::from_code(&row.id, &row.kind)?;
        let endpoints: Vec<String> = row
            .endpoints
            .split(ENDPOINT_SEPARATOR)
            .map(str::to_string)
            .collect();

        let obs = Self {
            id: row.id.clone(),
            kind,
            endpoints,
            value: row.value,
            sigma: row.sigma,
        };
        obs.check_arity()?;
        Ok(obs)
    }

    /// Build observations from all rows of a measurement table.
    pub fn from_rows(rows: &[MeasurementRow]) -> Result<Vec<Self>, AdjustmentError> {
        rows.iter().map(Self::from_row).collect()
    }

    /// Fail with `MalformedObservation` unless the endpoint count matches the kind.
    pub fn check_arity(&self) -> Result<(), AdjustmentError> {
        let expected = self.kind.endpoint_count();
        if self.endpoints.len() != expected || self.endpoints.iter().any(|e| e.is_empty()) {
            return Err(AdjustmentError::MalformedObservation {
                observation: self.id.clone(),
                expected,
                got: self.endpoints.iter().filter(|e| !e.is_empty()).count(),
            });
        }
        Ok(())
    }
}

/// One row of a measurement table as delivered by a file reader.
///
/// Angle values and sigmas must already be converted to radians.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementRow {
    /// Observation identifier.
    pub id: String,
    /// `_`-separated endpoint names.
    pub endpoints: String,
    /// `Angle` or `Dist`.
    pub kind: String,
    /// Observed value.
    pub value: f64,
    /// Standard deviation.
    pub sigma: f64,
}
