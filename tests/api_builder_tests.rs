use netadjust::prelude::*;

// ============================================================================
// Builder Validation
// ============================================================================

#[test]
fn test_defaults_build() {
    assert!(Adjustment::new().build().is_ok());
}

#[test]
fn test_full_configuration_builds() {
    let adj = Adjustment::new()
        .a_priori_variance(2.0)
        .threshold(1e-4)
        .max_iterations(50)
        .rank_deficiency(RankDeficiency::PseudoInverse)
        .outlier_factor(2.5)
        .build();
    assert!(adj.is_ok());
}

#[test]
fn test_duplicate_parameter() {
    let err = Adjustment::new()
        .threshold(1e-4)
        .threshold(1e-3)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        AdjustmentError::DuplicateParameter {
            parameter: "threshold"
        }
    );

    let err = Adjustment::new()
        .max_iterations(5)
        .max_iterations(5)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        AdjustmentError::DuplicateParameter {
            parameter: "max_iterations"
        }
    ));
}

#[test]
fn test_duplicate_reported_before_invalid_values() {
    let err = Adjustment::new()
        .a_priori_variance(-1.0)
        .a_priori_variance(-1.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, AdjustmentError::DuplicateParameter { .. }));
}

#[test]
fn test_invalid_values() {
    assert_eq!(
        Adjustment::new().a_priori_variance(0.0).build().unwrap_err(),
        AdjustmentError::InvalidVarianceFactor(0.0)
    );
    assert_eq!(
        Adjustment::new().threshold(-1.0).build().unwrap_err(),
        AdjustmentError::InvalidThreshold(-1.0)
    );
    assert_eq!(
        Adjustment::new().max_iterations(0).build().unwrap_err(),
        AdjustmentError::InvalidIterations(0)
    );
    assert_eq!(
        Adjustment::new().max_iterations(20_000).build().unwrap_err(),
        AdjustmentError::InvalidIterations(20_000)
    );
    assert_eq!(
        Adjustment::new().outlier_factor(-3.0).build().unwrap_err(),
        AdjustmentError::InvalidOutlierFactor(-3.0)
    );
}

#[test]
fn test_built_adjustment_is_reusable() {
    let adj = Adjustment::new().build().unwrap();
    let copy = adj;
    assert_eq!(adj, copy);
}

// ============================================================================
// Data Validation On Adjust
// ============================================================================

#[test]
fn test_adjust_rejects_empty_observations() {
    let mut network = Network::new();
    network.push(Point::known("A", 0.0, 0.0)).unwrap();
    let adj = Adjustment::new().build().unwrap();
    assert_eq!(
        adj.adjust(&network, &[]).unwrap_err(),
        AdjustmentError::EmptyObservations
    );
}

#[test]
fn test_adjust_rejects_unresolved_endpoint() {
    let mut network = Network::new();
    network.push(Point::known("A", 0.0, 0.0)).unwrap();
    network.push(Point::unknown("P", 10.0, 0.0)).unwrap();
    let obs = vec![
        Observation::distance("d1", "A", "P", 10.0, 0.01),
        Observation::distance("d2", "A", "Q", 10.0, 0.01),
    ];
    let adj = Adjustment::new().build().unwrap();
    assert_eq!(
        adj.adjust(&network, &obs).unwrap_err(),
        AdjustmentError::UnresolvedEndpoint {
            observation: "d2".into(),
            point: "Q".into()
        }
    );
}

#[test]
fn test_adjust_tables_rejects_unknown_kind() {
    let coords = vec![CoordinateRow {
        name: "A".into(),
        role: "K".into(),
        x: 0.0,
        y: 0.0,
    }];
    let rows = vec![MeasurementRow {
        id: "h1".into(),
        endpoints: "A_B".into(),
        kind: "Height".into(),
        value: 1.0,
        sigma: 0.01,
    }];
    let adj = Adjustment::new().build().unwrap();
    assert!(matches!(
        adj.adjust_tables(&coords, &rows),
        Err(AdjustmentError::UnsupportedObservationType { .. })
    ));
}
