//! End-to-end sessions through the service layer.

use std::fs;
use std::path::PathBuf;

use pc_app::{
    AnalysisConfig, AppError, PumpOverride, SourceConfig, analyze, export_json, load_config,
    load_pump, plot_pump, run_config, save_config,
};
use pc_plot::{JsonPlotSink, PorMode};
use pc_pump::PumpError;

const VENDOR_CSV: &str = "\
Curve export,,,
Pump,NP3153,,
Motor,15 kW,,
Impeller,488 mm,,
,,,
Flow [l/s],Head [m],Overall Efficiency [%],NPSHR-values [m]
0,50,0,1.5
10,48,40,1.8
20,44,65,2.4
30,38,72,3.3
40,30,68,4.6
50,20,50,6.2
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pc_app_{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn xylem() -> PumpOverride {
    PumpOverride {
        make: Some("Xylem".to_string()),
        model: None,
    }
}

#[test]
fn vendor_source_needs_a_make() {
    let dir = scratch_dir("needs_make");
    let path = dir.join("curve.csv");
    fs::write(&path, VENDOR_CSV).unwrap();

    let source = SourceConfig::Vendor { path };
    assert!(matches!(
        load_pump(&source, &PumpOverride::default()),
        Err(AppError::Load(_))
    ));

    let pump = load_pump(&source, &xylem()).unwrap();
    assert_eq!(pump.identity().full_name(), "Xylem NP3153");
    assert_eq!(pump.identity().motor(), Some("15 kW"));
    assert!(pump.has_npshr());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn analysis_report_matches_model() {
    let dir = scratch_dir("report");
    let path = dir.join("curve.csv");
    fs::write(&path, VENDOR_CSV).unwrap();
    let pump = load_pump(&SourceConfig::Vendor { path }, &xylem()).unwrap();

    let report = analyze(&pump, [80.0, 50.0]).unwrap();
    assert_eq!(report.bep.flow, 30.0);
    assert!((report.bep.head - 38.0).abs() < 1e-6);
    assert!((report.por.upper_flow - 36.0).abs() < 1e-12);
    assert_eq!(report.speeds.len(), 2);
    assert_eq!(report.speeds[1].speed_percent, 50.0);
    assert!((report.speeds[1].scaled.flow - 15.0).abs() < 1e-12);

    let text = report.to_text();
    assert!(text.starts_with("Xylem NP3153\n"));
    // header, BEP, POR, then a three-line summary per speed
    assert_eq!(text.lines().count(), 9);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["pump"], "Xylem NP3153");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn analysis_without_efficiency_is_missing_data() {
    let dir = scratch_dir("no_eff");
    let path = dir.join("curve.csv");
    fs::write(
        &path,
        "Q,H\n0,50\n10,48\n20,44\n30,38\n",
    )
    .unwrap();
    let source = SourceConfig::Generic {
        path,
        columns: pc_io::ColumnMapping::new("Q", "H"),
    };
    let pump = load_pump(&source, &xylem()).unwrap_err();
    // generic tables carry no model name either
    assert!(matches!(pump, AppError::Load(_)));

    let overrides = PumpOverride {
        make: Some("Xylem".into()),
        model: Some("NP3102".into()),
    };
    let pump = load_pump(&source, &overrides).unwrap();
    assert!(matches!(
        analyze(&pump, 80.0),
        Err(AppError::Pump(PumpError::MissingData { .. }))
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn default_plot_of_pump_without_efficiency_skips_bep_and_por() {
    let dir = scratch_dir("no_eff_plot");
    let path = dir.join("curve.csv");
    fs::write(&path, "Q,H\n0,50\n10,48\n20,44\n30,38\n").unwrap();
    let source = SourceConfig::Generic {
        path,
        columns: pc_io::ColumnMapping::new("Q", "H"),
    };
    let overrides = PumpOverride {
        make: Some("Xylem".into()),
        model: Some("NP3102".into()),
    };
    let pump = load_pump(&source, &overrides).unwrap();

    let mut config = AnalysisConfig::new(source);
    let result = plot_pump(&pump, &config, &mut JsonPlotSink::new()).unwrap();
    let labels: Vec<&str> = result.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels[0], "100%");
    assert!(!labels.iter().any(|l| l.contains("BEP") || l.contains("POR")));

    // an explicit request still needs the data
    config.plot.bep = Some(true);
    assert!(matches!(
        plot_pump(&pump, &config, &mut JsonPlotSink::new()),
        Err(AppError::Plot(_))
    ));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn json_export_feeds_back_as_source() {
    let dir = scratch_dir("json_source");
    let csv_path = dir.join("curve.csv");
    fs::write(&csv_path, VENDOR_CSV).unwrap();
    let pump = load_pump(&SourceConfig::Vendor { path: csv_path }, &xylem()).unwrap();

    let json_path = dir.join("pump.json");
    export_json(&pump, &json_path).unwrap();

    let reloaded = load_pump(
        &SourceConfig::Json { path: json_path },
        &PumpOverride::default(),
    )
    .unwrap();
    assert_eq!(reloaded.identity(), pump.identity());
    assert_eq!(reloaded.flow(), pump.flow());
    assert_eq!(reloaded.head(), pump.head());
    assert_eq!(reloaded.efficiency(), pump.efficiency());
    assert_eq!(reloaded.npshr(), pump.npshr());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn config_session_writes_chart() {
    let dir = scratch_dir("session");
    fs::write(dir.join("curve.csv"), VENDOR_CSV).unwrap();
    let config_path = dir.join("analysis.yaml");
    fs::write(
        &config_path,
        "\
pump: { make: Xylem }
source: { kind: vendor, path: curve.csv }
speeds: [90, 70]
plot: { por: fill, efficiency: true, npshr: true, speed_bep: true, output_dir: plots }
duty_point: { flow: 25.0, head: 41.0, as_line: true }
",
    )
    .unwrap();

    let config = load_config(&config_path).unwrap();
    assert_eq!(config.plot.por, Some(PorMode::Fill));
    let result = run_config(&config).unwrap();

    let labels: Vec<&str> = result.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "100%",
            "BEP",
            "POR",
            "90%",
            "70%",
            "BEP (scaled)",
            "NPSHr",
            "Efficiency",
            "Duty point"
        ]
    );

    let artifact = result.artifact.expect("chart written");
    assert!(artifact.starts_with(dir.join("plots")));
    assert!(artifact.exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn config_round_trips_through_yaml() {
    let dir = scratch_dir("config_yaml");
    let mut config = AnalysisConfig::new(SourceConfig::Vendor {
        path: dir.join("curve.csv"),
    });
    config.pump = xylem();
    config.speeds = vec![85.0];
    config.plot.por = Some(PorMode::Line);

    let path = dir.join("analysis.yaml");
    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded, config);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_config_file_names_path() {
    let path = std::env::temp_dir().join("pc_app_no_such_config.yaml");
    match load_config(&path) {
        Err(AppError::ConfigRead { path: p, .. }) => assert_eq!(p, path),
        other => panic!("unexpected {other:?}"),
    }
}
