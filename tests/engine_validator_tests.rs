#![cfg(feature = "dev")]
use netadjust::internals::engine::validator::Validator;
use netadjust::internals::primitives::errors::AdjustmentError;
use netadjust::internals::primitives::network::{Network, Point};
use netadjust::internals::primitives::observation::Observation;

// ============================================================================
// Data Validation
// ============================================================================

#[test]
fn test_valid_observations() {
    let obs = vec![
        Observation::distance("d1", "A", "B", 10.0, 0.01),
        Observation::angle("a1", "A", "B", "C", 1.0, 1e-5),
    ];
    assert!(Validator::validate_observations(&obs).is_ok());
}

#[test]
fn test_empty_observations() {
    assert_eq!(
        Validator::validate_observations(&[]),
        Err(AdjustmentError::EmptyObservations)
    );
}

#[test]
fn test_non_positive_sigma() {
    for sigma in [0.0, -0.01, f64::NAN, f64::INFINITY] {
        let obs = vec![Observation::distance("d1", "A", "B", 10.0, sigma)];
        assert!(matches!(
            Validator::validate_observations(&obs),
            Err(AdjustmentError::InvalidSigma { .. })
        ));
    }
}

#[test]
fn test_non_finite_value() {
    let obs = vec![Observation::distance("d1", "A", "B", f64::NAN, 0.01)];
    assert!(matches!(
        Validator::validate_observations(&obs),
        Err(AdjustmentError::InvalidNumericValue(_))
    ));
}

#[test]
fn test_arity_checked_before_values() {
    let mut obs = Observation::distance("d1", "A", "B", f64::NAN, 0.0);
    obs.endpoints.push("C".into());
    assert!(matches!(
        Validator::validate_observations(&[obs]),
        Err(AdjustmentError::MalformedObservation { .. })
    ));
}

#[test]
fn test_non_finite_coordinates() {
    let mut network = Network::new();
    network.push(Point::known("A", 0.0, f64::INFINITY)).unwrap();
    assert!(matches!(
        Validator::validate_network(&network),
        Err(AdjustmentError::InvalidNumericValue(_))
    ));
}

// ============================================================================
// Parameter Validation
// ============================================================================

#[test]
fn test_threshold_bounds() {
    assert!(Validator::validate_threshold(1e-6).is_ok());
    assert_eq!(
        Validator::validate_threshold(0.0),
        Err(AdjustmentError::InvalidThreshold(0.0))
    );
    assert!(Validator::validate_threshold(f64::NAN).is_err());
}

#[test]
fn test_iteration_bounds() {
    assert!(Validator::validate_iterations(1).is_ok());
    assert!(Validator::validate_iterations(10_000).is_ok());
    assert_eq!(
        Validator::validate_iterations(0),
        Err(AdjustmentError::InvalidIterations(0))
    );
    assert_eq!(
        Validator::validate_iterations(10_001),
        Err(AdjustmentError::InvalidIterations(10_001))
    );
}

#[test]
fn test_variance_and_outlier_factor() {
    assert!(Validator::validate_variance_factor(1.0).is_ok());
    assert_eq!(
        Validator::validate_variance_factor(-1.0),
        Err(AdjustmentError::InvalidVarianceFactor(-1.0))
    );
    assert!(Validator::validate_outlier_factor(3.0).is_ok());
    assert_eq!(
        Validator::validate_outlier_factor(0.0),
        Err(AdjustmentError::InvalidOutlierFactor(0.0))
    );
}

#[test]
fn test_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("threshold")),
        Err(AdjustmentError::DuplicateParameter {
            parameter: "threshold"
        })
    );
}
