//! Observation equations: design matrix and misclosure vector.
//!
//! ## Purpose
//!
//! This module linearises every observation around the current estimate of
//! the unknowns. For observation `i` it computes the predicted value from
//! point coordinates, the misclosure `w[i] = predicted - observed`, and the
//! partial derivatives of the predicted value with respect to the
//! coordinates of each unknown endpoint (row `i` of the design matrix `A`).
//!
//! ## Design notes
//!
//! * **Pure**: coordinates of unknown endpoints are read from `x`, never from
//!   or into the network. Repeated builds with the same input are
//!   bit-identical.
//! * **Sparse rows**: `A` starts at zero; only columns of unknown endpoints
//!   are written. Known points contribute nothing.
//! * **Accumulation**: a point appearing in two roles of one observation adds
//!   both partials into its columns.
//! * **Degenerate geometry**: a zero-length sight line fails with
//!   `DegenerateGeometry` only if one of its ends is unknown. Between known
//!   points the predicted value is still defined and the row stays zero.
//!
//! ## Key concepts
//!
//! * **Angle** `(to = Pj, at = Pi, from = Pk)`:
//!   ```text
//!   α = normalize(atan2(yk - yi, xk - xi) - atan2(yj - yi, xj - xi))
//!   ∂α/∂xk = -(yk - yi)/rk²     ∂α/∂yk =  (xk - xi)/rk²
//!   ∂α/∂xj =  (yj - yi)/rj²     ∂α/∂yj = -(xj - xi)/rj²
//!   ∂α/∂xi = -(∂α/∂xk + ∂α/∂xj) ∂α/∂yi = -(∂α/∂yk + ∂α/∂yj)
//!   ```
//! * **Distance** `(start = Pi, end = Pj)`:
//!   ```text
//!   d = sqrt((xj - xi)² + (yj - yi)²)
//!   ∂d/∂xi = (xi - xj)/d   ∂d/∂yi = (yi - yj)/d   ∂d/∂xj = -∂d/∂xi   ∂d/∂yj = -∂d/∂yi
//!   ```
//!
//! ## Invariants
//!
//! * `A` is `n × 2u` and `w` has length `n`, `n` observations and `u` unknown points.
//! * Row order follows observation order; column pair `[2k, 2k+1]` belongs to
//!   the k-th unknown point.

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector};

use crate::math::angle::{direction, normalize_angle};
use crate::primitives::errors::AdjustmentError;
use crate::primitives::network::Network;
use crate::primitives::observation::{Observation, ObservationKind};

// ============================================================================
// Geometry
// ============================================================================

/// Partial derivatives `[∂/∂x, ∂/∂y]` for one endpoint.
pub type Partials = [f64; 2];

/// Predicted angle at `at`, from the `to` line to the `from` line, normalized.
pub fn predicted_angle(to: (f64, f64), at: (f64, f64), from: (f64, f64)) -> f64 {
    let raw = direction(at.0, at.1, from.0, from.1) - direction(at.0, at.1, to.0, to.1);
    normalize_angle(raw)
}

/// Partials of the direction from `at` to `end` with respect to `end`.
///
/// Returns `None` for a zero-length sight line.
#[inline]
pub fn direction_partials(at: (f64, f64), end: (f64, f64)) -> Option<Partials> {
    let (dx, dy) = (end.0 - at.0, end.1 - at.1);
    let r2 = dx * dx + dy * dy;
    if r2 == 0.0 {
        return None;
    }
    Some([-dy / r2, dx / r2])
}

/// Combine the two sight-line partials of an angle into `[to, at, from]`.
#[inline]
fn combine_angle_partials(to_leg: Partials, from_leg: Partials) -> [Partials; 3] {
    let d_to = [-to_leg[0], -to_leg[1]];
    let d_from = from_leg;
    let d_at = [-(d_to[0] + d_from[0]), -(d_to[1] + d_from[1])];
    [d_to, d_at, d_from]
}

/// Partials of the angle with respect to `[to, at, from]`.
///
/// Returns `None` if `to` or `from` coincides with `at`.
pub fn angle_partials(
    to: (f64, f64),
    at: (f64, f64),
    from: (f64, f64),
) -> Option<[Partials; 3]> {
    let to_leg = direction_partials(at, to)?;
    let from_leg = direction_partials(at, from)?;
    Some(combine_angle_partials(to_leg, from_leg))
}

/// Predicted distance between `start` and `end`.
#[inline]
pub fn predicted_distance(start: (f64, f64), end: (f64, f64)) -> f64 {
    (end.0 - start.0).hypot(end.1 - start.1)
}

/// Partials of the distance with respect to `[start, end]`.
///
/// Returns `None` if the endpoints coincide.
pub fn distance_partials(start: (f64, f64), end: (f64, f64)) -> Option<[Partials; 2]> {
    let d = predicted_distance(start, end);
    if d == 0.0 {
        return None;
    }
    let dx = (start.0 - end.0) / d;
    let dy = (start.1 - end.1) / d;
    Some([[dx, dy], [-dx, -dy]])
}

// ============================================================================
// Equation System
// ============================================================================

/// Linearised observation equations at one estimate of the unknowns.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationEquations {
    /// Design matrix `A` (`n × 2u`).
    pub design: DMatrix<f64>,
    /// Misclosure vector `w` (predicted minus observed).
    pub misclosure: DVector<f64>,
}

/// Endpoint coordinates local to one build, with the endpoint's first
/// column in `A` if it is unknown.
#[derive(Debug, Clone, Copy)]
struct Station {
    x: f64,
    y: f64,
    column: Option<usize>,
}

impl Station {
    #[inline]
    fn coords(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[inline]
    fn is_known(&self) -> bool {
        self.column.is_none()
    }
}

/// Resolved endpoint: index into the network's points and its first column
/// in `A` if the point is unknown.
#[derive(Debug, Clone, Copy)]
struct Slot {
    point: usize,
    column: Option<usize>,
}

/// Builds `(A, w)` for a fixed network and observation set.
///
/// Point names are resolved to design-matrix columns once, on construction.
#[derive(Debug, Clone)]
pub struct EquationBuilder<'a> {
    network: &'a Network,
    observations: &'a [Observation],
    slots: HashMap<&'a str, Slot>,
}

impl<'a> EquationBuilder<'a> {
    /// Create a builder over `network` and `observations`.
    pub fn new(network: &'a Network, observations: &'a [Observation]) -> Self {
        let mut slots = HashMap::with_capacity(network.len());
        let mut unknowns = 0;
        for (idx, point) in network.points().iter().enumerate() {
            let column = if point.is_unknown() {
                unknowns += 1;
                Some(2 * (unknowns - 1))
            } else {
                None
            };
            // First occurrence wins, as with `Network::find_point`
            slots
                .entry(point.name.as_str())
                .or_insert(Slot { point: idx, column });
        }
        Self {
            network,
            observations,
            slots,
        }
    }

    /// Build the design matrix and misclosure vector at the unknowns `x`.
    pub fn build(&self, x: &DVector<f64>) -> Result<ObservationEquations, AdjustmentError> {
        let n = self.observations.len();
        let cols = 2 * self.network.unknown_count();
        if x.len() != cols {
            return Err(AdjustmentError::InvalidNumericValue(format!(
                "unknowns vector has length {}, expected {}",
                x.len(),
                cols
            )));
        }

        let mut design = DMatrix::zeros(n, cols);
        let mut misclosure = DVector::zeros(n);

        for (i, obs) in self.observations.iter().enumerate() {
            obs.check_arity()?;

            let stations = obs
                .endpoints
                .iter()
                .map(|name| self.station(obs, name, x))
                .collect::<Result<Vec<_>, _>>()?;

            let degenerate = || AdjustmentError::DegenerateGeometry {
                observation: obs.id.clone(),
            };

            // A zero-length sight line only matters if its partials land in A
            let leg = |at: Station, end: Station| -> Result<Partials, AdjustmentError> {
                match direction_partials(at.coords(), end.coords()) {
                    Some(p) => Ok(p),
                    None if at.is_known() && end.is_known() => Ok([0.0, 0.0]),
                    None => Err(degenerate()),
                }
            };

            match obs.kind {
                ObservationKind::Angle => {
                    let (to, at, from) = (stations[0], stations[1], stations[2]);
                    let partials = combine_angle_partials(leg(at, to)?, leg(at, from)?);
                    misclosure[i] =
                        predicted_angle(to.coords(), at.coords(), from.coords()) - obs.value;
                    Self::scatter(&mut design, i, &stations, &partials);
                }
                ObservationKind::Distance => {
                    let (start, end) = (stations[0], stations[1]);
                    misclosure[i] = predicted_distance(start.coords(), end.coords()) - obs.value;
                    match distance_partials(start.coords(), end.coords()) {
                        Some(partials) => Self::scatter(&mut design, i, &stations, &partials),
                        None if start.is_known() && end.is_known() => {}
                        None => return Err(degenerate()),
                    }
                }
            }
        }

        Ok(ObservationEquations { design, misclosure })
    }

    /// Resolve an endpoint name to coordinates, taking unknown coordinates from `x`.
    fn station(
        &self,
        obs: &Observation,
        name: &str,
        x: &DVector<f64>,
    ) -> Result<Station, AdjustmentError> {
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| AdjustmentError::UnresolvedEndpoint {
                observation: obs.id.clone(),
                point: name.to_string(),
            })?;

        Ok(match slot.column {
            Some(col) => Station {
                x: x[col],
                y: x[col + 1],
                column: Some(col),
            },
            None => {
                let point = &self.network.points()[slot.point];
                Station {
                    x: point.x,
                    y: point.y,
                    column: None,
                }
            }
        })
    }

    /// Add endpoint partials into row `row` of `design`.
    fn scatter(design: &mut DMatrix<f64>, row: usize, stations: &[Station], partials: &[Partials]) {
        for (station, p) in stations.iter().zip(partials) {
            if let Some(col) = station.column {
                design[(row, col)] += p[0];
                design[(row, col + 1)] += p[1];
            }
        }
    }
}

/// Build `(A, w)` for `observations` over `network` at the unknowns `x`.
pub fn build_equations(
    network: &Network,
    observations: &[Observation],
    x: &DVector<f64>,
) -> Result<ObservationEquations, AdjustmentError> {
    EquationBuilder::new(network, observations).build(x)
}
