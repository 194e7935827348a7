//! Integration scenarios for the pump performance model.

use pc_pump::{
    AffinityScaler, DEFAULT_SPEEDS, PumpCurveModel, PumpError, SpeedSet,
};
use proptest::prelude::*;

fn reference_pump() -> PumpCurveModel {
    let mut pump = PumpCurveModel::new("Xylem", "NP3153", Some("488".into()), Some("15 kW".into()))
        .unwrap();
    pump.define_curve(
        vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0],
        vec![50.0, 48.0, 44.0, 38.0, 30.0, 20.0],
    )
    .unwrap();
    pump.define_efficiency(vec![0.0, 40.0, 65.0, 72.0, 68.0, 50.0], None)
        .unwrap();
    pump.define_npshr(vec![1.5, 1.8, 2.4, 3.3, 4.6, 6.2], None)
        .unwrap();
    pump
}

#[test]
fn worked_example_bep_and_por() {
    let pump = reference_pump();

    let bep = pump.best_efficiency_point().unwrap();
    assert_eq!(bep.flow, 30.0);
    assert!((bep.head - 38.0).abs() < 1e-6);

    let por = pump.preferred_operating_range().unwrap();
    assert!((por.upper_flow - 36.0).abs() < 1e-12);
    assert!((por.lower_flow - 21.0).abs() < 1e-12);
    // head = 50 - 0.1q - 0.01q^2 for this data
    assert!((por.upper_head - 33.44).abs() < 1e-6);
    assert!((por.lower_head - 43.49).abs() < 1e-6);
}

#[test]
fn worked_example_half_speed_curve() {
    let mut pump = PumpCurveModel::new("Xylem", "NP3153", None, None).unwrap();
    pump.define_curve(vec![0.0, 10.0, 20.0], vec![50.0, 48.0, 44.0])
        .unwrap();
    let (flow, head) = pump.speed_curve(50.0).unwrap();
    assert_eq!(flow, vec![0.0, 5.0, 10.0]);
    assert_eq!(head, vec![12.5, 12.0, 11.0]);
}

#[test]
fn reference_speed_returns_curve_unchanged() {
    let pump = reference_pump();
    let (flow, head) = pump.speed_curve(100.0).unwrap();
    assert_eq!(flow, pump.flow());
    assert_eq!(head, pump.head());
}

#[test]
fn default_speed_set_covers_five_speeds() {
    let pump = reference_pump();
    let curves = pump.speed_curves(SpeedSet::default()).unwrap();
    assert_eq!(curves.speeds().collect::<Vec<_>>(), DEFAULT_SPEEDS.to_vec());
    for (_, (flow, head)) in curves.iter() {
        assert_eq!(flow.len(), pump.flow().len());
        assert_eq!(head.len(), pump.head().len());
    }
}

#[test]
fn scalar_speed_is_accepted_by_batch_calls() {
    let pump = reference_pump();
    let single = pump.speed_curves(70.0).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single.get(70.0).unwrap(), &pump.speed_curve(70.0).unwrap());

    let beps = pump.speed_bep(70.0).unwrap();
    assert_eq!(beps.len(), 1);
}

#[test]
fn speed_por_scales_reference_por() {
    let pump = reference_pump();
    let por = pump.preferred_operating_range().unwrap();
    let scaled = pump.speed_por([80.0, 60.0]).unwrap();
    let at_60 = scaled.get(60.0).unwrap();
    assert!((at_60.upper_flow - por.upper_flow * 0.6).abs() < 1e-12);
    assert!((at_60.lower_head - por.lower_head * 0.36).abs() < 1e-12);
}

#[test]
fn scaled_bep_matches_recomputed_bep_on_scaled_curve() {
    let pump = reference_pump();
    let speed = 70.0;
    let (flow, head) = pump.speed_curve(speed).unwrap();
    let (eff_flow, _) = AffinityScaler::scale_curve(
        pump.efficiency_flow().unwrap(),
        pump.efficiency().unwrap(),
        speed,
    );

    let mut scaled = PumpCurveModel::new("Xylem", "NP3153 @70%", None, None).unwrap();
    scaled.define_curve(flow, head).unwrap();
    scaled
        .define_efficiency(pump.efficiency().unwrap().to_vec(), Some(eff_flow))
        .unwrap();

    let direct = scaled.best_efficiency_point().unwrap();
    let projected = pump.speed_bep(speed).unwrap();
    let (q, h) = *projected.get(speed).unwrap();
    assert!((direct.flow - q).abs() <= 1e-9 * q.abs().max(1.0));
    assert!((direct.head - h).abs() <= 1e-9 * h.abs().max(1.0));
}

#[test]
fn npshr_fit_uses_own_basis() {
    let mut pump = reference_pump();
    pump.define_npshr(vec![1.0, 2.0, 3.0, 4.0, 5.0], Some(vec![5.0, 15.0, 25.0, 35.0, 45.0]))
        .unwrap();
    let fit = pump.npshr_fit().unwrap();
    assert!((fit.evaluate(20.0) - 2.5).abs() < 1e-9);
}

#[test]
fn missing_efficiency_propagates_through_speed_queries() {
    let mut pump = PumpCurveModel::new("Xylem", "NP3153", None, None).unwrap();
    pump.define_curve(vec![0.0, 10.0, 20.0, 30.0], vec![40.0, 38.0, 33.0, 25.0])
        .unwrap();
    assert!(matches!(
        pump.speed_bep(80.0),
        Err(PumpError::MissingData { field: "efficiency" })
    ));
    assert!(matches!(
        pump.speed_por([80.0, 60.0]),
        Err(PumpError::MissingData { field: "efficiency" })
    ));
    assert!(pump.best_efficiency_point_at_speed(80.0).is_err());
}

fn curve_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    (4usize..12).prop_flat_map(|n| {
        (
            Just(n),
            10.0_f64..80.0,
            prop::collection::vec(0.0_f64..90.0, n),
        )
            .prop_map(|(n, shutoff, eff)| {
                let flow: Vec<f64> = (0..n).map(|i| i as f64 * 5.0).collect();
                let head: Vec<f64> = flow
                    .iter()
                    .map(|q| shutoff - 0.002 * q * q)
                    .collect();
                (flow, head, eff)
            })
    })
}

proptest! {
    #[test]
    fn bep_flow_is_flow_at_max_efficiency((flow, head, eff) in curve_strategy()) {
        let mut pump = PumpCurveModel::new("Test", "P1", None, None).unwrap();
        pump.define_curve(flow.clone(), head).unwrap();
        pump.define_efficiency(eff.clone(), None).unwrap();
        let bep = pump.best_efficiency_point().unwrap();

        let max = eff.iter().cloned().fold(f64::MIN, f64::max);
        let idx = eff.iter().position(|&e| e == max).unwrap();
        prop_assert_eq!(bep.flow, flow[idx]);
        prop_assert_eq!(bep.efficiency_percent, max);

        let por = pump.preferred_operating_range().unwrap();
        prop_assert_eq!(por.upper_flow, 1.2 * bep.flow);
        prop_assert_eq!(por.lower_flow, 0.7 * bep.flow);
    }

    #[test]
    fn speed_bep_follows_affinity_laws(
        (flow, head, eff) in curve_strategy(),
        s in 10.0_f64..120.0,
    ) {
        let mut pump = PumpCurveModel::new("Test", "P1", None, None).unwrap();
        pump.define_curve(flow, head).unwrap();
        pump.define_efficiency(eff, None).unwrap();
        let bep = pump.best_efficiency_point().unwrap();
        let scaled = pump.speed_bep([s]).unwrap();
        let (q, h) = *scaled.get(s).unwrap();
        prop_assert_eq!(q, bep.flow * (s / 100.0));
        prop_assert_eq!(h, bep.head * ((s / 100.0) * (s / 100.0)));
    }
}
