//! Scene primitives handed to render backends.
//!
//! These types are backend-agnostic: a renderer walks
//! [`SceneDescription::primitives`] in order and draws each one, skipping any
//! primitive for which [`ScenePrimitive::is_drawable`] is false.

mod color;

pub use color::{Color, ColorParseError};

use crate::geom::{Circle, Point};
use crate::trace::TraceId;
use crate::view::Viewport;

/// Dash pattern for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineDash {
    /// Continuous stroke.
    #[default]
    Solid,
    /// Long dashes.
    Dashed,
    /// Dots.
    Dotted,
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// Dash pattern.
    pub dash: LineDash,
}

impl LineStyle {
    /// Solid stroke.
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: LineDash::Solid,
        }
    }

    /// Replace the dash pattern.
    pub const fn with_dash(mut self, dash: LineDash) -> Self {
        self.dash = dash;
        self
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

/// Marker shape for point markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkerShape {
    /// Circle marker.
    Circle,
    /// Square marker.
    Square,
    /// Cross marker.
    Cross,
}

/// Marker styling.
///
/// Marker sizes are expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 6.0,
            shape: MarkerShape::Circle,
        }
    }
}

/// Text anchoring relative to the label position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text is centered on the position.
    #[default]
    Center,
    /// Text hangs below the position (used for real-axis labels).
    Top,
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in points.
    pub size: f32,
    /// Anchoring of the text box on its position.
    pub anchor: TextAnchor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 8.0,
            anchor: TextAnchor::Center,
        }
    }
}

/// Which part of the chart a primitive belongs to.
///
/// Renderers may use this for z-ordering or hit testing; tests use it to
/// pick primitives out of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Constant-R circles with R ≥ 1.
    OuterResistance,
    /// Constant-R circles with 0 < R ≤ 1.
    InnerResistance,
    /// Numeric labels on the real axis.
    ResistanceLabel,
    /// The highlighted R = 1 circle.
    R1Highlight,
    /// Constant-X arcs.
    Reactance,
    /// ±jX labels.
    ReactanceLabel,
    /// Radial spokes of the grid.
    RadialGrid,
    /// |Γ| = 1.
    UnitCircle,
    /// A trace's Γ marker.
    TraceMarker,
    /// |Γ| and angle annotation next to the marker.
    TraceAnnotation,
    /// Dotted guide from the origin to the marker.
    TraceGuide,
    /// Constant-|Γ| circle of a trace.
    SwrCircle,
    /// Normalized admittance point of a trace.
    AdmittanceMarker,
    /// λ-toward-generator probe line and label.
    WavelengthProbe,
    /// Γ angle label on the rim.
    GammaAngle,
    /// SWR circle ∩ R = 1 markers.
    SwrR1Intersection,
    /// Legend rows.
    Legend,
}

/// A single drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenePrimitive {
    /// A full circle.
    Circle {
        /// Layer tag.
        layer: Layer,
        /// Geometry.
        circle: Circle,
        /// Stroke.
        style: LineStyle,
    },
    /// A circle of which only the parts inside the unit disk are drawn.
    Arc {
        /// Layer tag.
        layer: Layer,
        /// Underlying circle.
        circle: Circle,
        /// Sampled, clipped polylines in draw order.
        segments: Vec<Vec<Point>>,
        /// Stroke.
        style: LineStyle,
    },
    /// A straight line.
    Line {
        /// Layer tag.
        layer: Layer,
        /// Start point.
        start: Point,
        /// End point.
        end: Point,
        /// Stroke.
        style: LineStyle,
    },
    /// A point marker.
    Marker {
        /// Layer tag.
        layer: Layer,
        /// Owning trace, if any.
        trace: Option<TraceId>,
        /// Marker position; may lie outside the disk for active loads.
        position: Point,
        /// Marker styling.
        style: MarkerStyle,
        /// Legend text for this marker.
        legend: String,
    },
    /// A text label.
    Label {
        /// Layer tag.
        layer: Layer,
        /// Text content, possibly multi-line.
        text: String,
        /// Anchor position.
        position: Point,
        /// Rotation in degrees, counter-clockwise.
        rotation: f64,
        /// Text styling.
        style: TextStyle,
    },
    /// A legend row for one trace.
    LegendEntry {
        /// Owning trace.
        trace: TraceId,
        /// Row text.
        text: String,
        /// Swatch color.
        color: Color,
    },
}

impl ScenePrimitive {
    /// Layer this primitive belongs to.
    pub fn layer(&self) -> Layer {
        match self {
            Self::Circle { layer, .. }
            | Self::Arc { layer, .. }
            | Self::Line { layer, .. }
            | Self::Marker { layer, .. }
            | Self::Label { layer, .. } => *layer,
            Self::LegendEntry { .. } => Layer::Legend,
        }
    }

    /// Check whether the primitive is free of infinity sentinels.
    pub fn is_drawable(&self) -> bool {
        match self {
            Self::Circle { circle, .. } => circle.is_finite(),
            Self::Arc { circle, .. } => circle.is_finite(),
            Self::Line { start, end, .. } => start.is_finite() && end.is_finite(),
            Self::Marker { position, .. } => position.is_finite(),
            Self::Label {
                position, rotation, ..
            } => position.is_finite() && rotation.is_finite(),
            Self::LegendEntry { .. } => true,
        }
    }
}

/// Ordered list of primitives making up one redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    viewport: Viewport,
    primitives: Vec<ScenePrimitive>,
}

impl SceneDescription {
    /// Create an empty scene covering the given viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            primitives: Vec::new(),
        }
    }

    /// Push a primitive.
    pub fn push(&mut self, primitive: ScenePrimitive) {
        self.primitives.push(primitive);
    }

    /// Region of the Γ-plane the renderer should show.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access all primitives in draw order.
    pub fn primitives(&self) -> &[ScenePrimitive] {
        &self.primitives
    }

    /// Iterate over the primitives of one layer.
    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &ScenePrimitive> {
        self.primitives
            .iter()
            .filter(move |primitive| primitive.layer() == layer)
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Range, Viewport};

    fn viewport() -> Viewport {
        Viewport::new(Range::new(-1.0, 1.0), Range::new(-1.0, 1.0))
    }

    #[test]
    fn sentinel_marker_is_not_drawable() {
        let marker = ScenePrimitive::Marker {
            layer: Layer::TraceMarker,
            trace: None,
            position: Point::new(f64::INFINITY, 0.0),
            style: MarkerStyle::default(),
            legend: "Z0".to_string(),
        };
        assert!(!marker.is_drawable());
        assert_eq!(marker.layer(), Layer::TraceMarker);
    }

    #[test]
    fn layer_filter_preserves_order() {
        let mut scene = SceneDescription::new(viewport());
        for radius in [0.25, 0.5] {
            scene.push(ScenePrimitive::Circle {
                layer: Layer::OuterResistance,
                circle: Circle::centered(radius),
                style: LineStyle::default(),
            });
        }
        scene.push(ScenePrimitive::Circle {
            layer: Layer::UnitCircle,
            circle: Circle::UNIT,
            style: LineStyle::default(),
        });
        let radii: Vec<f64> = scene
            .layer(Layer::OuterResistance)
            .filter_map(|primitive| match primitive {
                ScenePrimitive::Circle { circle, .. } => Some(circle.radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![0.25, 0.5]);
        assert_eq!(scene.len(), 3);
    }
}
