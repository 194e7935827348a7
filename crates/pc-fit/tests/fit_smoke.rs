//! Fitting behaviour on measured-looking pump data.

use pc_fit::{DEFAULT_DEGREE, FitError, fit, fit_cubic};

#[test]
fn smooths_measured_head_curve() {
    let flow = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0];
    let head = [50.0, 48.0, 44.0, 38.0, 30.0, 20.0];
    let poly = fit_cubic(&flow, &head).unwrap();

    assert_eq!(poly.degree(), DEFAULT_DEGREE);
    for (q, h) in flow.iter().zip(head) {
        assert!(
            (poly.evaluate(*q) - h).abs() < 0.5,
            "fit({q}) = {} vs measured {h}",
            poly.evaluate(*q)
        );
    }
}

#[test]
fn vectorized_evaluation_matches_scalar() {
    let flow = [0.0, 100.0, 200.0, 300.0, 400.0, 500.0];
    let head = [80.0, 78.5, 74.0, 66.0, 55.0, 40.0];
    let poly = fit_cubic(&flow, &head).unwrap();

    let samples = [21.0, 150.0, 333.3, 480.0];
    let many = poly.evaluate_many(&samples);
    for (x, y) in samples.iter().zip(many) {
        assert_eq!(y, poly.evaluate(*x));
    }
}

#[test]
fn degree_bound_is_enforced_for_any_degree() {
    let xs = [0.0, 1.0];
    let ys = [0.0, 1.0];
    assert!(fit(&xs, &ys, 1).is_ok());
    let err = fit(&xs, &ys, 2).unwrap_err();
    assert!(err.is_insufficient_data());
    assert!(matches!(err, FitError::InsufficientData { required: 3, .. }));
}
