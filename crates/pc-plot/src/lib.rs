//! pc-plot: assembly of pump curve charts.
//!
//! A [`CurvePresenter`] borrows a pump model and accumulates drawing layers
//! (base curve, BEP, POR, NPSHr, efficiency, speed overlays, duty point).
//! [`CurvePresenter::render`] hands the layers and a consolidated legend to a
//! [`VisualizationSink`], which owns the actual output format.
//!
//! ```
//! use pc_plot::{CurvePresenter, PorMode, RecordingSink, RenderOptions};
//! use pc_pump::PumpCurveModel;
//!
//! let mut pump = PumpCurveModel::new("Xylem", "NP3153", None, None).unwrap();
//! pump.define_curve(
//!     vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0],
//!     vec![50.0, 48.0, 44.0, 38.0, 30.0, 20.0],
//! )
//! .unwrap();
//! pump.define_efficiency(vec![0.0, 40.0, 65.0, 72.0, 68.0, 50.0], None)
//!     .unwrap();
//!
//! let mut presenter = CurvePresenter::new(&pump);
//! presenter.base_layer()?.with_bep()?.with_por(PorMode::Marker)?;
//!
//! let mut sink = RecordingSink::default();
//! let result = presenter.render(&RenderOptions::default(), &mut sink)?;
//! assert_eq!(result.layer_count, 3);
//! # Ok::<(), pc_plot::PlotError>(())
//! ```

pub mod layer;
pub mod presenter;
pub mod sink;

pub use layer::{Axis, Color, Layer, LegendEntry, LegendGlyph, LineStyle, MarkerShape};
pub use presenter::{CurvePresenter, FILL_SAMPLES, PorMode, RenderOptions, RenderResult};
pub use sink::{Frame, JsonPlotSink, RecordingSink, VisualizationSink, artifact_file_name};

use pc_pump::PumpError;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    /// A layer was requested before the layer it builds on.
    #[error("Invalid plot state: {what}")]
    State { what: &'static str },

    #[error("Pump model error: {0}")]
    Pump(#[from] PumpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
