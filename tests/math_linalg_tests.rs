#![cfg(feature = "dev")]
use approx::assert_relative_eq;
use nalgebra::DMatrix;
use netadjust::internals::math::linalg::{RankDeficiency, invert_normal_matrix, numerical_rank};

#[test]
fn test_invert_full_rank() {
    let n = DMatrix::from_row_slice(2, 2, &[4.0, 1.0, 1.0, 3.0]);
    let inv = invert_normal_matrix(&n, RankDeficiency::Fail).unwrap();
    let identity = &n * &inv;
    assert_relative_eq!(identity, DMatrix::identity(2, 2), epsilon = 1e-12);
}

#[test]
fn test_singular_fails_by_default() {
    let n = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]);
    assert!(invert_normal_matrix(&n, RankDeficiency::Fail).is_none());
}

#[test]
fn test_nearly_singular_detected() {
    // Second row is the first scaled, perturbed far below the rank tolerance
    let n = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0 + 1e-17]);
    assert!(invert_normal_matrix(&n, RankDeficiency::Fail).is_none());
    assert_eq!(numerical_rank(&n), 1);
}

#[test]
fn test_singular_pseudo_inverse() {
    let n = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 0.0]);
    let inv = invert_normal_matrix(&n, RankDeficiency::PseudoInverse).unwrap();
    assert_relative_eq!(inv[(0, 0)], 1.0, epsilon = 1e-12);
    assert_relative_eq!(inv[(1, 1)], 0.0, epsilon = 1e-12);
    assert_relative_eq!(inv[(0, 1)], 0.0, epsilon = 1e-12);
}

#[test]
fn test_empty_matrix() {
    let n = DMatrix::<f64>::zeros(0, 0);
    let inv = invert_normal_matrix(&n, RankDeficiency::Fail).unwrap();
    assert_eq!(inv.nrows(), 0);
    assert_eq!(numerical_rank(&n), 0);
}

#[test]
fn test_non_finite_rejected() {
    let n = DMatrix::from_row_slice(2, 2, &[1.0, f64::NAN, f64::NAN, 1.0]);
    assert!(invert_normal_matrix(&n, RankDeficiency::PseudoInverse).is_none());
}
