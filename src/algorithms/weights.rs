//! Observation weight matrix.
//!
//! ## Purpose
//!
//! This module builds the diagonal weight matrix `P` with
//! `P[i][i] = σ0² / σ_i²` from the observations' standard deviations.
//!
//! ## Design notes
//!
//! * Only the diagonal is stored; dense forms are produced on demand.
//! * Products with `P` scale rows instead of multiplying by an `n×n` matrix.
//!
//! ## Invariants
//!
//! * Built once per run and never mutated.
//! * Every weight is positive and finite when sigmas have been validated.

use nalgebra::{DMatrix, DVector};

use crate::primitives::observation::Observation;

/// Diagonal weight matrix of an adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    diagonal: DVector<f64>,
    a_priori_variance: f64,
}

impl WeightMatrix {
    /// Build weights `σ0² / σ_i²` for each observation, in observation order.
    pub fn new(observations: &[Observation], a_priori_variance: f64) -> Self {
        let diagonal = DVector::from_iterator(
            observations.len(),
            observations
                .iter()
                .map(|obs| a_priori_variance / (obs.sigma * obs.sigma)),
        );
        Self {
            diagonal,
            a_priori_variance,
        }
    }

    /// Build directly from weights (mostly for tests and benchmarks).
    pub fn from_diagonal(diagonal: DVector<f64>, a_priori_variance: f64) -> Self {
        Self {
            diagonal,
            a_priori_variance,
        }
    }

    /// The a-priori variance factor σ0² used for these weights.
    #[inline]
    pub fn a_priori_variance(&self) -> f64 {
        self.a_priori_variance
    }

    /// Weights as a vector.
    #[inline]
    pub fn diagonal(&self) -> &DVector<f64> {
        &self.diagonal
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.diagonal.len()
    }

    /// Whether there are no weights.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diagonal.is_empty()
    }

    /// Dense `n×n` weight matrix.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.diagonal)
    }

    /// Dense `P⁻¹`, the cofactor matrix of the observations.
    pub fn inverse(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.diagonal.map(|p| 1.0 / p))
    }

    /// `P·M` for a matrix with `n` rows.
    pub fn weigh_rows(&self, m: &DMatrix<f64>) -> DMatrix<f64> {
        let mut out = m.clone();
        for (mut row, &p) in out.row_iter_mut().zip(self.diagonal.iter()) {
            row *= p;
        }
        out
    }

    /// `P·v` for a vector of length `n`.
    pub fn weigh_vector(&self, v: &DVector<f64>) -> DVector<f64> {
        v.component_mul(&self.diagonal)
    }

    /// Quadratic form `vᵗPv`.
    pub fn quadratic_form(&self, v: &DVector<f64>) -> f64 {
        v.iter()
            .zip(self.diagonal.iter())
            .map(|(&vi, &p)| vi * vi * p)
            .sum()
    }
}
