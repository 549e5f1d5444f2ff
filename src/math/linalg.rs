//! Normal-matrix inversion for the least-squares solver.
//!
//! ## Purpose
//!
//! This module inverts the normal matrix `N = AᵗPA` on the nalgebra backend
//! and decides whether it is singular.
//!
//! ## Design notes
//!
//! * Singularity is a rank test on the singular values of `N` with relative
//!   tolerance `dim · ε · σ_max`. Exact zero pivots are too weak a test for
//!   floating-point normal matrices.
//! * Full-rank matrices are inverted through Cholesky (N is symmetric
//!   positive definite), falling back to the SVD if roundoff defeats it.
//! * Rank-deficient matrices either fail or yield the SVD pseudo-inverse,
//!   depending on [`RankDeficiency`].

use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Rank Deficiency Policy
// ============================================================================

/// What to do when the normal matrix is singular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RankDeficiency {
    /// Abort with `SingularNormalEquations`.
    #[default]
    Fail,

    /// Use the minimum-norm solution from the SVD pseudo-inverse.
    PseudoInverse,
}

// ============================================================================
// Inversion
// ============================================================================

/// Relative tolerance below which a singular value counts as zero.
#[inline]
fn rank_tolerance(matrix: &DMatrix<f64>, max_singular: f64) -> f64 {
    matrix.nrows().max(1) as f64 * f64::EPSILON * max_singular
}

/// Numerical rank of a square matrix.
pub fn numerical_rank(matrix: &DMatrix<f64>) -> usize {
    if matrix.is_empty() {
        return 0;
    }
    let svd = matrix.clone().svd(false, false);
    let max = svd.singular_values.max();
    let tol = rank_tolerance(matrix, max);
    svd.singular_values.iter().filter(|&&s| s > tol).count()
}

/// Invert the normal matrix `AᵗPA`.
///
/// Returns `None` when the matrix is singular and `policy` is
/// [`RankDeficiency::Fail`], or when it contains non-finite entries.
pub fn invert_normal_matrix(normal: &DMatrix<f64>, policy: RankDeficiency) -> Option<DMatrix<f64>> {
    let dim = normal.nrows();
    if dim == 0 {
        return Some(DMatrix::zeros(0, 0));
    }
    if normal.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let svd = normal.clone().svd(true, true);
    let max = svd.singular_values.max();
    let tol = rank_tolerance(normal, max);
    let rank = svd.singular_values.iter().filter(|&&s| s > tol).count();

    if rank < dim {
        return match policy {
            RankDeficiency::Fail => None,
            RankDeficiency::PseudoInverse => svd.pseudo_inverse(tol).ok(),
        };
    }

    if let Some(chol) = normal.clone().cholesky() {
        return Some(chol.inverse());
    }

    svd.pseudo_inverse(tol).ok()
}
