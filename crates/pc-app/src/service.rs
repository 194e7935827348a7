//! Loading, analysis and chart sessions.

use std::path::Path;

use pc_io::{CurveRecord, load_generic_csv, load_vendor_csv, read_json, write_json};
use pc_plot::{
    CurvePresenter, JsonPlotSink, PorMode, RenderOptions, RenderResult, VisualizationSink,
};
use pc_pump::{
    BepAtSpeed, BestEfficiencyPoint, PreferredOperatingRange, PumpCurveModel, SpeedSet,
};
use serde::Serialize;

use crate::config::{AnalysisConfig, PumpOverride, SourceConfig};
use crate::error::AppResult;

/// Read a curve source and build the pump model.
pub fn load_pump(source: &SourceConfig, overrides: &PumpOverride) -> AppResult<PumpCurveModel> {
    let record: CurveRecord = match source {
        SourceConfig::Vendor { path } => load_vendor_csv(path)?,
        SourceConfig::Generic { path, columns } => load_generic_csv(path, columns)?,
        SourceConfig::Json { path } => read_json(path)?,
    };
    let pump = record.to_model(overrides.make.as_deref(), overrides.model.as_deref())?;
    tracing::debug!(
        pump = %pump.identity(),
        points = pump.flow().len(),
        efficiency = pump.has_efficiency(),
        npshr = pump.has_npshr(),
        "pump model built"
    );
    Ok(pump)
}

/// BEP, POR and per-speed BEP of one pump.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub pump: String,
    pub bep: BestEfficiencyPoint,
    pub por: PreferredOperatingRange,
    pub speeds: Vec<BepAtSpeed>,
}

impl AnalysisReport {
    /// Multi-line human-readable report.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n  BEP: {}\n  POR: {}\n", self.pump, self.bep, self.por);
        for at_speed in &self.speeds {
            out.push_str("  ");
            out.push_str(&at_speed.summary(&self.pump));
            out.push('\n');
        }
        out
    }
}

pub fn analyze(pump: &PumpCurveModel, speeds: impl Into<SpeedSet>) -> AppResult<AnalysisReport> {
    let bep = pump.best_efficiency_point()?;
    let por = pump.preferred_operating_range()?;
    let speeds = speeds.into();
    let mut at_speeds = Vec::with_capacity(speeds.len());
    for &speed in &speeds {
        at_speeds.push(pump.best_efficiency_point_at_speed(speed)?);
    }
    Ok(AnalysisReport {
        pump: pump.identity().full_name(),
        bep,
        por,
        speeds: at_speeds,
    })
}

/// Write the normalized record of `pump` as indented JSON.
pub fn export_json(pump: &PumpCurveModel, path: &Path) -> AppResult<()> {
    write_json(path, &CurveRecord::from_model(pump))?;
    Ok(())
}

/// Assemble the chart described by `config` and hand it to `sink`.
pub fn plot_pump(
    pump: &PumpCurveModel,
    config: &AnalysisConfig,
    sink: &mut dyn VisualizationSink,
) -> AppResult<RenderResult> {
    let plot = &config.plot;
    let has_efficiency = pump.has_efficiency();
    if !has_efficiency && (plot.bep.is_none() || plot.por.is_none()) {
        tracing::info!(pump = %pump.identity(), "no efficiency curve, BEP and POR overlays skipped");
    }
    let por = plot.por_mode(has_efficiency);

    let mut presenter = CurvePresenter::new(pump);
    presenter.base_layer()?;

    if plot.show_bep(has_efficiency) {
        presenter.with_bep()?;
    }
    if por != PorMode::None {
        presenter.with_por(por)?;
    }
    if !config.speeds.is_empty() {
        presenter.with_speed_overlays(config.speeds.as_slice(), plot.speed_bep, por)?;
    }
    if plot.npshr {
        presenter.with_npshr()?;
    }
    if plot.efficiency {
        presenter.with_efficiency()?;
    }
    if let Some(duty) = &config.duty_point {
        presenter.with_duty_point(duty.flow, duty.head, duty.as_line)?;
    }

    let options = RenderOptions {
        title: plot.title.clone(),
        grid: plot.grid,
        output_dir: plot.output_dir.clone(),
    };
    Ok(presenter.render(&options, sink)?)
}

/// Full config-driven session rendered to a JSON plot document.
pub fn run_config(config: &AnalysisConfig) -> AppResult<RenderResult> {
    let pump = load_pump(&config.source, &config.pump)?;
    let mut sink = JsonPlotSink::new();
    plot_pump(&pump, config, &mut sink)
}
