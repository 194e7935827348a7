//! Drawing instructions handed to a sink.

use serde::{Deserialize, Serialize};

/// Vertical axis a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Head, NPSHr (m)
    Primary,
    /// Efficiency (%)
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Cross,
}

/// sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const GREY: Color = Color(128, 128, 128);
    pub const RED: Color = Color(214, 39, 40);
    pub const GREEN: Color = Color(44, 160, 44);
    pub const BLUE: Color = Color(31, 119, 180);
    pub const PURPLE: Color = Color(148, 103, 189);
    pub const ORANGE: Color = Color(255, 127, 14);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// One drawing instruction. Points are `(flow, value)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Layer {
    Line {
        label: Option<String>,
        points: Vec<(f64, f64)>,
        color: Color,
        style: LineStyle,
        axis: Axis,
    },
    Markers {
        label: Option<String>,
        points: Vec<(f64, f64)>,
        color: Color,
        shape: MarkerShape,
    },
    /// Closed polygon; the last point joins back to the first.
    Fill {
        label: Option<String>,
        polygon: Vec<(f64, f64)>,
        color: Color,
        alpha: f64,
    },
    VerticalLine {
        label: Option<String>,
        x: f64,
        y_min: f64,
        y_max: f64,
        color: Color,
        style: LineStyle,
    },
}

/// How a legend entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendGlyph {
    Line(LineStyle),
    Marker(MarkerShape),
    Patch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub glyph: LegendGlyph,
}

impl Layer {
    pub fn label(&self) -> Option<&str> {
        match self {
            Layer::Line { label, .. }
            | Layer::Markers { label, .. }
            | Layer::Fill { label, .. }
            | Layer::VerticalLine { label, .. } => label.as_deref(),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Layer::Line { axis, .. } => *axis,
            _ => Axis::Primary,
        }
    }

    /// Legend entry for a labelled layer.
    pub fn legend_entry(&self) -> Option<LegendEntry> {
        let label = self.label()?.to_string();
        let (color, glyph) = match self {
            Layer::Line { color, style, .. } | Layer::VerticalLine { color, style, .. } => {
                (*color, LegendGlyph::Line(*style))
            }
            Layer::Markers { color, shape, .. } => (*color, LegendGlyph::Marker(*shape)),
            Layer::Fill { color, .. } => (*color, LegendGlyph::Patch),
        };
        Some(LegendEntry {
            label,
            color,
            glyph,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex() {
        assert_eq!(Color::RED.hex(), "#d62728");
        assert_eq!(Color::BLACK.hex(), "#000000");
    }

    #[test]
    fn unlabelled_layer_has_no_legend_entry() {
        let layer = Layer::Markers {
            label: None,
            points: vec![(1.0, 2.0)],
            color: Color::RED,
            shape: MarkerShape::Circle,
        };
        assert!(layer.legend_entry().is_none());
    }

    #[test]
    fn legend_glyph_follows_layer_kind() {
        let fill = Layer::Fill {
            label: Some("POR".into()),
            polygon: vec![(0.0, 0.0), (1.0, 1.0), (1.0, 0.0)],
            color: Color::GREEN,
            alpha: 0.2,
        };
        let entry = fill.legend_entry().unwrap();
        assert_eq!(entry.glyph, LegendGlyph::Patch);
        assert_eq!(entry.label, "POR");

        let line = Layer::Line {
            label: Some("Efficiency".into()),
            points: vec![],
            color: Color::BLUE,
            style: LineStyle::Dashed,
            axis: Axis::Secondary,
        };
        assert_eq!(line.axis(), Axis::Secondary);
        assert_eq!(
            line.legend_entry().unwrap().glyph,
            LegendGlyph::Line(LineStyle::Dashed)
        );
    }
}
