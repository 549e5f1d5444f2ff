#![cfg(feature = "dev")]
use approx::assert_relative_eq;
use nalgebra::{DMatrix, DVector};
use netadjust::internals::algorithms::equations::ObservationEquations;
use netadjust::internals::algorithms::weights::WeightMatrix;
use netadjust::internals::evaluation::precision::analyze;
use netadjust::internals::primitives::errors::AdjustmentError;

/// Straight-line fit y = a + b·t written as an adjustment with n observations.
fn line_system(n: usize) -> (ObservationEquations, DVector<f64>, WeightMatrix, DMatrix<f64>, DVector<f64>) {
    let t: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let observed = DVector::from_iterator(n, t.iter().map(|&ti| 1.0 + 2.0 * ti + if ti as usize % 2 == 0 { 0.1 } else { -0.1 }));

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { t[i] });
    // Linearised at (a, b) = (0, 0): predicted = 0
    let misclosure = -observed.clone();
    let weights = WeightMatrix::from_diagonal(DVector::from_element(n, 1.0), 1.0);

    let normal = design.transpose() * &design;
    let cofactor = normal.try_inverse().unwrap_or_else(|| DMatrix::zeros(2, 2));
    let delta = -(&cofactor * (design.transpose() * &misclosure));

    (
        ObservationEquations { design, misclosure },
        delta,
        weights,
        cofactor,
        observed,
    )
}

// ============================================================================
// Degrees of Freedom Boundary
// ============================================================================

#[test]
fn test_n_equal_u_is_insufficient() {
    let (eq, delta, p, cx, l) = line_system(2);
    assert_eq!(
        analyze(&eq, &delta, &p, &cx, &l),
        Err(AdjustmentError::InsufficientRedundancy {
            observations: 2,
            unknowns: 2
        })
    );
}

#[test]
fn test_n_less_than_u_is_insufficient() {
    let (eq, delta, p, cx, l) = line_system(1);
    assert!(matches!(
        analyze(&eq, &delta, &p, &cx, &l),
        Err(AdjustmentError::InsufficientRedundancy {
            observations: 1,
            unknowns: 2
        })
    ));
}

#[test]
fn test_n_greater_than_u_succeeds() {
    let (eq, delta, p, cx, l) = line_system(3);
    let stats = analyze(&eq, &delta, &p, &cx, &l).unwrap();
    assert_eq!(stats.degrees_of_freedom, 1);
}

// ============================================================================
// Statistics
// ============================================================================

#[test]
fn test_residuals_and_adjusted_observations() {
    let (eq, delta, p, cx, l) = line_system(6);
    let stats = analyze(&eq, &delta, &p, &cx, &l).unwrap();

    let expected_r = &eq.design * &delta + &eq.misclosure;
    assert_relative_eq!(stats.residuals, expected_r, epsilon = 1e-12);
    assert_relative_eq!(stats.adjusted, &l + &expected_r, epsilon = 1e-12);

    // Least-squares residuals are orthogonal to the columns of A
    let orth = eq.design.transpose() * &stats.residuals;
    assert_relative_eq!(orth[0], 0.0, epsilon = 1e-10);
    assert_relative_eq!(orth[1], 0.0, epsilon = 1e-10);
}

#[test]
fn test_variance_factor_and_covariances() {
    let (eq, delta, p, cx, l) = line_system(6);
    let stats = analyze(&eq, &delta, &p, &cx, &l).unwrap();

    let rtpr: f64 = stats.residuals.iter().map(|r| r * r).sum();
    assert_relative_eq!(stats.a_posteriori_variance, rtpr / 4.0, epsilon = 1e-12);
    assert_relative_eq!(stats.unit_variance, stats.a_posteriori_variance, epsilon = 1e-15);

    let cx_hat = &cx * stats.a_posteriori_variance;
    assert_relative_eq!(stats.unknowns_covariance, cx_hat, epsilon = 1e-12);

    let cl = &eq.design * &cx_hat * eq.design.transpose();
    assert_relative_eq!(stats.observations_covariance, cl, epsilon = 1e-12);

    let cr = DMatrix::identity(6, 6) * stats.a_posteriori_variance - &cl;
    assert_relative_eq!(stats.residuals_covariance, cr, epsilon = 1e-12);

    // Residual variances are non-negative for an unweighted line fit
    for i in 0..6 {
        assert!(stats.residuals_covariance[(i, i)] > -1e-12);
    }
}

#[test]
fn test_unit_variance_uses_a_priori_factor() {
    let (eq, delta, _, cx, l) = line_system(5);
    // Same relative weights, σ0² = 4 quadruples every weight
    let p = WeightMatrix::from_diagonal(DVector::from_element(5, 4.0), 4.0);
    let cofactor = &cx / 4.0;
    let stats = analyze(&eq, &delta, &p, &cofactor, &l).unwrap();
    assert_relative_eq!(
        stats.unit_variance,
        stats.a_posteriori_variance / 4.0,
        epsilon = 1e-15
    );
}
