//! Layer-by-layer assembly of a pump curve chart.

use std::path::PathBuf;

use pc_core::numeric::linspace;
use pc_fit::Polynomial;
use pc_pump::{
    AffinityScaler, PreferredOperatingRange, PumpCurveModel, REFERENCE_SPEED, SpeedSet,
};
use serde::{Deserialize, Serialize};

use crate::layer::{Axis, Color, Layer, LegendEntry, LineStyle, MarkerShape};
use crate::sink::{Frame, VisualizationSink, artifact_file_name};
use crate::{PlotError, PlotResult};

/// Samples per edge of POR fill polygons, per POR boundary line and per
/// fitted overlay.
pub const FILL_SAMPLES: usize = 50;

const FLOW_LABEL: &str = "Flow [l/s]";
const HEAD_LABEL: &str = "Head [m]";
const EFFICIENCY_LABEL: &str = "Efficiency [%]";

/// How the preferred operating range is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PorMode {
    None,
    #[default]
    Marker,
    /// Affinity parabolas through the POR bounds
    Line,
    /// Shaded region between the POR bounds
    Fill,
}

/// Final rendering choices.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub title: Option<String>,
    pub grid: bool,
    /// Persist an artifact into this directory.
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RenderResult {
    pub legend: Vec<LegendEntry>,
    pub layer_count: usize,
    pub artifact: Option<PathBuf>,
}

/// A chart under construction for one pump.
///
/// `base_layer` must come first; every other layer builds on it. Each call
/// returns the presenter so layers chain with `?`.
pub struct CurvePresenter<'a> {
    model: &'a PumpCurveModel,
    layers: Vec<Layer>,
    has_base: bool,
    has_secondary: bool,
}

impl<'a> CurvePresenter<'a> {
    pub fn new(model: &'a PumpCurveModel) -> Self {
        Self {
            model,
            layers: Vec::new(),
            has_base: false,
            has_secondary: false,
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    fn require_base(&self) -> PlotResult<()> {
        if !self.has_base {
            return Err(PlotError::State {
                what: "base layer must be drawn first",
            });
        }
        Ok(())
    }

    /// Measured flow/head curve at reference speed.
    pub fn base_layer(&mut self) -> PlotResult<&mut Self> {
        if !self.model.has_curve() {
            return Err(PlotError::State {
                what: "pump curve is empty",
            });
        }
        let points = zip_points(self.model.flow(), self.model.head());
        self.layers.push(Layer::Line {
            label: Some(speed_label(REFERENCE_SPEED)),
            points,
            color: Color::BLACK,
            style: LineStyle::Solid,
            axis: Axis::Primary,
        });
        self.has_base = true;
        Ok(self)
    }

    pub fn with_bep(&mut self) -> PlotResult<&mut Self> {
        self.require_base()?;
        let bep = self.model.best_efficiency_point()?;
        self.layers.push(Layer::Markers {
            label: Some("BEP".to_string()),
            points: vec![(bep.flow, bep.head)],
            color: Color::RED,
            shape: MarkerShape::Circle,
        });
        Ok(self)
    }

    /// POR at reference speed.
    ///
    /// `Line` draws the affinity parabolas from the origin through each bound;
    /// `Fill` shades the wedge between them under the reference curve.
    pub fn with_por(&mut self, mode: PorMode) -> PlotResult<&mut Self> {
        self.require_base()?;
        let por = self.model.preferred_operating_range()?;
        match mode {
            PorMode::None => {}
            PorMode::Marker => self.push_por_markers("POR", &[por]),
            PorMode::Line => self.push_por_lines(&por, 0.0),
            PorMode::Fill => {
                let polygon = self.por_polygon(&por, 0.0)?;
                self.push_por_fill(polygon);
            }
        }
        Ok(self)
    }

    /// Fitted NPSHr over its flow basis.
    pub fn with_npshr(&mut self) -> PlotResult<&mut Self> {
        self.require_base()?;
        let fit = self.model.npshr_fit()?;
        let flow = self.model.npshr_flow().unwrap_or_default();
        self.layers.push(Layer::Line {
            label: Some("NPSHr".to_string()),
            points: fitted_points(&fit, flow),
            color: Color::PURPLE,
            style: LineStyle::Dashed,
            axis: Axis::Primary,
        });
        Ok(self)
    }

    /// Fitted efficiency on the secondary axis.
    pub fn with_efficiency(&mut self) -> PlotResult<&mut Self> {
        self.require_base()?;
        let fit = self.model.efficiency_fit()?;
        let flow = self.model.efficiency_flow().unwrap_or_default();
        self.layers.push(Layer::Line {
            label: Some("Efficiency".to_string()),
            points: fitted_points(&fit, flow),
            color: Color::BLUE,
            style: LineStyle::Dotted,
            axis: Axis::Secondary,
        });
        self.has_secondary = true;
        Ok(self)
    }

    /// Curves at other speeds, optionally with their BEPs and PORs.
    pub fn with_speed_overlays(
        &mut self,
        speeds: impl Into<SpeedSet>,
        show_bep: bool,
        por_mode: PorMode,
    ) -> PlotResult<&mut Self> {
        self.require_base()?;
        let speeds = speeds.into();
        if speeds.is_empty() {
            return Ok(self);
        }

        for (speed, (flow, head)) in self.model.speed_curves(&speeds)? {
            self.layers.push(Layer::Line {
                label: Some(speed_label(speed)),
                points: zip_points(&flow, &head),
                color: Color::GREY,
                style: LineStyle::Solid,
                axis: Axis::Primary,
            });
        }

        if show_bep {
            let beps = self.model.speed_bep(&speeds)?;
            self.layers.push(Layer::Markers {
                label: Some("BEP (scaled)".to_string()),
                points: beps.iter().map(|(_, p)| *p).collect(),
                color: Color::RED,
                shape: MarkerShape::Triangle,
            });
        }

        if por_mode == PorMode::None {
            return Ok(self);
        }
        let por = self.model.preferred_operating_range()?;
        let lowest = speeds.min().unwrap_or(REFERENCE_SPEED);
        let ratio = AffinityScaler::ratio(lowest).flow;
        match por_mode {
            PorMode::None => {}
            PorMode::Marker => {
                let scaled: Vec<PreferredOperatingRange> = self
                    .model
                    .speed_por(&speeds)?
                    .into_iter()
                    .map(|(_, p)| p)
                    .collect();
                self.push_por_markers("POR (scaled)", &scaled);
            }
            PorMode::Line => self.push_por_lines(&por, ratio),
            PorMode::Fill => {
                let polygon = self.por_polygon(&por, ratio)?;
                self.push_por_fill(polygon);
            }
        }
        tracing::debug!(speeds = ?speeds.as_slice(), ?por_mode, "speed overlays added");
        Ok(self)
    }

    /// Single operating point, as a marker or a vertical line from zero to
    /// the highest reference head.
    pub fn with_duty_point(&mut self, flow: f64, head: f64, as_line: bool) -> PlotResult<&mut Self> {
        self.require_base()?;
        let layer = if as_line {
            Layer::VerticalLine {
                label: Some("Duty point".to_string()),
                x: flow,
                y_min: 0.0,
                y_max: self.model.max_head().unwrap_or(head),
                color: Color::ORANGE,
                style: LineStyle::Dashed,
            }
        } else {
            Layer::Markers {
                label: Some("Duty point".to_string()),
                points: vec![(flow, head)],
                color: Color::ORANGE,
                shape: MarkerShape::Cross,
            }
        };
        self.layers.push(layer);
        Ok(self)
    }

    /// Hand every layer to `sink`, then finish with a consolidated legend.
    pub fn render(
        self,
        options: &RenderOptions,
        sink: &mut dyn VisualizationSink,
    ) -> PlotResult<RenderResult> {
        self.require_base()?;
        let legend = consolidate_legend(&self.layers);
        for layer in &self.layers {
            sink.draw(layer)?;
        }

        let identity = self.model.identity();
        let frame = Frame {
            title: options
                .title
                .clone()
                .unwrap_or_else(|| identity.full_name()),
            x_label: FLOW_LABEL.to_string(),
            y_label: HEAD_LABEL.to_string(),
            secondary_y_label: self.has_secondary.then(|| EFFICIENCY_LABEL.to_string()),
            grid: options.grid,
            legend: legend.clone(),
        };

        let path = options.output_dir.as_ref().map(|dir| {
            dir.join(artifact_file_name(
                identity,
                chrono::Local::now().naive_local(),
                sink.extension(),
            ))
        });
        let artifact = sink.finish(&frame, path.as_deref())?;
        if let Some(p) = &artifact {
            tracing::info!(path = %p.display(), "pump curve chart saved");
        }

        Ok(RenderResult {
            legend,
            layer_count: self.layers.len(),
            artifact,
        })
    }

    fn push_por_markers(&mut self, label: &str, pors: &[PreferredOperatingRange]) {
        let points = pors
            .iter()
            .flat_map(|p| [(p.lower_flow, p.lower_head), (p.upper_flow, p.upper_head)])
            .collect();
        self.layers.push(Layer::Markers {
            label: Some(label.to_string()),
            points,
            color: Color::GREEN,
            shape: MarkerShape::Square,
        });
    }

    /// Both POR bound parabolas from `ratio` of reference speed up to 100%.
    fn push_por_lines(&mut self, por: &PreferredOperatingRange, ratio: f64) {
        let bounds = [
            ("POR lower limit", por.lower_flow, por.lower_head),
            ("POR upper limit", por.upper_flow, por.upper_head),
        ];
        for (label, flow, head) in bounds {
            self.layers.push(Layer::Line {
                label: Some(label.to_string()),
                points: affinity_parabola(flow, head, ratio, 1.0),
                color: Color::GREEN,
                style: LineStyle::Dashed,
                axis: Axis::Primary,
            });
        }
    }

    fn push_por_fill(&mut self, polygon: Vec<(f64, f64)>) {
        self.layers.push(Layer::Fill {
            label: Some("POR".to_string()),
            polygon,
            color: Color::GREEN,
            alpha: 0.2,
        });
    }

    /// Region bounded by the POR parabolas, the reference curve and the
    /// curve at `ratio` of reference speed.
    ///
    /// Walk: lower parabola up, reference fit from lower to upper flow,
    /// upper parabola down, scaled fit back from upper to lower flow.
    fn por_polygon(
        &self,
        por: &PreferredOperatingRange,
        ratio: f64,
    ) -> PlotResult<Vec<(f64, f64)>> {
        let fit = self.model.head_fit()?;
        let mut polygon = Vec::with_capacity(4 * FILL_SAMPLES);

        polygon.extend(affinity_parabola(
            por.lower_flow,
            por.lower_head,
            ratio,
            1.0,
        ));

        let flows = linspace(por.lower_flow, por.upper_flow, FILL_SAMPLES);
        let heads = fit.evaluate_many(&flows);
        polygon.extend(flows.into_iter().zip(heads));

        polygon.extend(affinity_parabola(
            por.upper_flow,
            por.upper_head,
            1.0,
            ratio,
        ));

        if ratio > 0.0 {
            let scaled_flows = linspace(por.upper_flow * ratio, por.lower_flow * ratio, FILL_SAMPLES);
            for q in scaled_flows {
                polygon.push((q, fit.evaluate(q / ratio) * ratio * ratio));
            }
        }
        Ok(polygon)
    }
}

/// Points on `H = head * (Q / flow)^2` for speed ratios `from..=to`.
fn affinity_parabola(flow: f64, head: f64, from: f64, to: f64) -> Vec<(f64, f64)> {
    linspace(from, to, FILL_SAMPLES)
        .into_iter()
        .map(|r| (flow * r, head * r * r))
        .collect()
}

/// `fit` sampled evenly across the span of `flow`.
fn fitted_points(fit: &Polynomial, flow: &[f64]) -> Vec<(f64, f64)> {
    let lo = flow.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = flow.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(lo.is_finite() && hi.is_finite()) {
        return Vec::new();
    }
    linspace(lo, hi, FILL_SAMPLES)
        .into_iter()
        .map(|q| (q, fit.evaluate(q)))
        .collect()
}

fn zip_points(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter().copied().zip(y.iter().copied()).collect()
}

fn speed_label(speed: f64) -> String {
    format!("{speed}%")
}

/// One entry per label, in first-drawn order.
fn consolidate_legend(layers: &[Layer]) -> Vec<LegendEntry> {
    let mut legend: Vec<LegendEntry> = Vec::new();
    for entry in layers.iter().filter_map(Layer::legend_entry) {
        if !legend.iter().any(|e| e.label == entry.label) {
            legend.push(entry);
        }
    }
    legend
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parabola_runs_between_ratios() {
        let pts = affinity_parabola(30.0, 40.0, 0.5, 1.0);
        assert_eq!(pts.len(), FILL_SAMPLES);
        assert_eq!(pts[0], (15.0, 10.0));
        assert_eq!(pts[FILL_SAMPLES - 1], (30.0, 40.0));
    }

    #[test]
    fn speed_labels() {
        assert_eq!(speed_label(100.0), "100%");
        assert_eq!(speed_label(82.5), "82.5%");
    }

    #[test]
    fn legend_deduplicates_by_label() {
        let line = |label: &str| Layer::Line {
            label: Some(label.to_string()),
            points: vec![],
            color: Color::GREY,
            style: LineStyle::Solid,
            axis: Axis::Primary,
        };
        let layers = vec![line("100%"), line("POR"), line("100%"), line("90%")];
        let legend = consolidate_legend(&layers);
        let labels: Vec<&str> = legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["100%", "POR", "90%"]);
    }
}
