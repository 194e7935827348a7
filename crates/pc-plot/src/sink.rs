//! Output backends for assembled charts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use pc_pump::PumpIdentity;
use serde::Serialize;

use crate::PlotResult;
use crate::layer::{Layer, LegendEntry};

/// Chart-level decorations passed to [`VisualizationSink::finish`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_y_label: Option<String>,
    pub grid: bool,
    pub legend: Vec<LegendEntry>,
}

/// Rendering backend. Receives layers in drawing order, then one `finish`.
pub trait VisualizationSink {
    fn draw(&mut self, layer: &Layer) -> PlotResult<()>;

    /// Complete the chart. When `path` is given the sink persists there and
    /// returns the written path.
    fn finish(&mut self, frame: &Frame, path: Option<&Path>) -> PlotResult<Option<PathBuf>>;

    /// File extension for persisted artifacts, without the dot.
    fn extension(&self) -> &'static str;
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub layers: Vec<Layer>,
    pub frame: Option<Frame>,
}

impl VisualizationSink for RecordingSink {
    fn draw(&mut self, layer: &Layer) -> PlotResult<()> {
        self.layers.push(layer.clone());
        Ok(())
    }

    fn finish(&mut self, frame: &Frame, _path: Option<&Path>) -> PlotResult<Option<PathBuf>> {
        self.frame = Some(frame.clone());
        Ok(None)
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

#[derive(Serialize)]
struct PlotDocument<'a> {
    #[serde(flatten)]
    frame: &'a Frame,
    layers: &'a [Layer],
}

/// Writes a self-describing JSON plot document that any charting frontend
/// can draw.
#[derive(Debug, Default)]
pub struct JsonPlotSink {
    layers: Vec<Layer>,
    document: Option<String>,
}

impl JsonPlotSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the last `finish`.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}

impl VisualizationSink for JsonPlotSink {
    fn draw(&mut self, layer: &Layer) -> PlotResult<()> {
        self.layers.push(layer.clone());
        Ok(())
    }

    fn finish(&mut self, frame: &Frame, path: Option<&Path>) -> PlotResult<Option<PathBuf>> {
        let doc = PlotDocument {
            frame,
            layers: &self.layers,
        };
        let json = serde_json::to_string_pretty(&doc)?;
        let written = match path {
            Some(path) => {
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir)?;
                }
                fs::write(path, &json)?;
                Some(path.to_path_buf())
            }
            None => None,
        };
        self.document = Some(json);
        Ok(written)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// `<make>_<model>_<YYYYmmdd_HHMMSS>.<ext>`, with path-hostile characters
/// replaced by `_`.
pub fn artifact_file_name(identity: &PumpIdentity, at: NaiveDateTime, extension: &str) -> String {
    format!(
        "{}_{}_{}.{}",
        sanitize(identity.make()),
        sanitize(identity.model()),
        at.format("%Y%m%d_%H%M%S"),
        extension
    )
}

fn sanitize(part: &str) -> String {
    part.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn file_name_uses_timestamp() {
        let id = PumpIdentity::new("Grundfos", "CR 10-3", None, None).unwrap();
        assert_eq!(
            artifact_file_name(&id, stamp(), "json"),
            "Grundfos_CR_10-3_20240307_140509.json"
        );
    }

    #[test]
    fn slashes_are_replaced() {
        assert_eq!(sanitize("A/B\\C"), "A_B_C");
    }

    #[test]
    fn recording_sink_keeps_frame() {
        let mut sink = RecordingSink::default();
        let frame = Frame {
            title: "t".into(),
            x_label: "x".into(),
            y_label: "y".into(),
            secondary_y_label: None,
            grid: true,
            legend: vec![],
        };
        let out = sink.finish(&frame, None).unwrap();
        assert!(out.is_none());
        assert_eq!(sink.frame, Some(frame));
    }
}
