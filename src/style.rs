//! Visual theme: stroke widths, font sizes and the trace palette.

use crate::render::Color;

/// Default trace palette, cycled by trace creation order.
pub const DEFAULT_PALETTE: [Color; 9] = [
    Color::from_rgb8(0xe4, 0x1a, 0x1c),
    Color::from_rgb8(0x37, 0x7e, 0xb8),
    Color::from_rgb8(0x4d, 0xaf, 0x4a),
    Color::from_rgb8(0x98, 0x4e, 0xa3),
    Color::from_rgb8(0xff, 0x7f, 0x00),
    Color::from_rgb8(0xff, 0xff, 0x33),
    Color::from_rgb8(0xa6, 0x56, 0x28),
    Color::from_rgb8(0xf7, 0x81, 0xbf),
    Color::from_rgb8(0x99, 0x99, 0x99),
];

/// Visual theme for charts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Theme {
    /// Chart background, for renderers that fill one.
    pub background: Color,
    /// Stroke width of grid loci.
    pub grid_width: f32,
    /// Stroke width of the R = 1 highlight and the unit circle.
    pub highlight_width: f32,
    /// Stroke width of per-trace guides and SWR circles.
    pub trace_width: f32,
    /// Marker size in pixels.
    pub marker_size: f32,
    /// Font size of grid labels.
    pub label_size: f32,
    /// Font size of trace annotations.
    pub annotation_size: f32,
    palette: Vec<Color>,
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self::dark()
    }

    /// Dark background theme.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb8(0x12, 0x12, 0x12),
            grid_width: 0.5,
            highlight_width: 0.7,
            trace_width: 0.8,
            marker_size: 6.0,
            label_size: 8.0,
            annotation_size: 7.0,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }

    /// Light background theme.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            ..Self::dark()
        }
    }

    /// Replace the trace palette. An empty palette falls back to the default.
    pub fn with_palette(mut self, palette: impl IntoIterator<Item = Color>) -> Self {
        let palette: Vec<Color> = palette.into_iter().collect();
        self.palette = if palette.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            palette
        };
        self
    }

    /// Access the trace palette.
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Palette color for the n-th created trace.
    pub fn palette_color(&self, creation_index: u64) -> Color {
        let palette: &[Color] = if self.palette.is_empty() {
            &DEFAULT_PALETTE
        } else {
            &self.palette
        };
        palette[(creation_index % palette.len() as u64) as usize]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
