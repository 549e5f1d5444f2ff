#![cfg(feature = "dev")]
use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use netadjust::internals::algorithms::weights::WeightMatrix;
use netadjust::internals::primitives::observation::Observation;

fn observations() -> Vec<Observation> {
    vec![
        Observation::distance("d1", "A", "B", 100.0, 0.01),
        Observation::distance("d2", "A", "C", 100.0, 0.02),
        Observation::angle("a1", "B", "A", "C", 1.0, 0.5),
    ]
}

#[test]
fn test_weights_from_sigmas() {
    let p = WeightMatrix::new(&observations(), 1.0);
    assert_eq!(p.len(), 3);
    assert_relative_eq!(p.diagonal()[0], 10_000.0, max_relative = 1e-12);
    assert_relative_eq!(p.diagonal()[1], 2_500.0, max_relative = 1e-12);
    assert_relative_eq!(p.diagonal()[2], 4.0, max_relative = 1e-12);
}

#[test]
fn test_weights_scale_with_a_priori_variance() {
    let p = WeightMatrix::new(&observations(), 4.0);
    assert_relative_eq!(p.diagonal()[2], 16.0, max_relative = 1e-12);
    assert_eq!(p.a_priori_variance(), 4.0);
}

#[test]
fn test_dense_forms() {
    let p = WeightMatrix::from_diagonal(DVector::from_vec(vec![2.0, 4.0]), 1.0);
    let dense = p.to_matrix();
    assert_eq!(dense, DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]));

    let inv = p.inverse();
    assert_relative_eq!(inv[(0, 0)], 0.5);
    assert_relative_eq!(inv[(1, 1)], 0.25);
    assert_eq!(inv[(0, 1)], 0.0);
}

#[test]
fn test_weigh_rows_matches_dense_product() {
    let p = WeightMatrix::from_diagonal(DVector::from_vec(vec![2.0, 3.0]), 1.0);
    let a = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(p.weigh_rows(&a), p.to_matrix() * &a);
}

#[test]
fn test_quadratic_form() {
    let p = WeightMatrix::from_diagonal(DVector::from_vec(vec![2.0, 3.0]), 1.0);
    let v = DVector::from_vec(vec![1.0, -2.0]);
    assert_relative_eq!(p.quadratic_form(&v), 14.0);
    assert_eq!(p.weigh_vector(&v), DVector::from_vec(vec![2.0, -6.0]));
}
