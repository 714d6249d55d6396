//! Chart-wide grid parameters and their validated sparse updates.

use thiserror::Error;

use crate::render::Color;
use crate::view::steps_up_to;

/// Default color for resistance, reactance, radial, unit and Γ loci.
pub const DEFAULT_GRID_COLOR: Color = Color::from_rgb8(0x32, 0x32, 0x32);
/// Default color of the R = 1 highlight.
pub const DEFAULT_R1_COLOR: Color = Color::from_rgb8(0xe6, 0x55, 0x0d);

/// A rejected grid field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A count or stride below its minimum of 1.
    #[error("`{field}` must be at least 1, got {value}")]
    CountTooSmall {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: usize,
    },
    /// A length that must be positive and finite.
    #[error("`{field}` must be positive and finite, got {value}")]
    NotPositive {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Grid parameters shared by every trace on the chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridParams {
    outer_resistance_count: usize,
    inner_resistance_count: usize,
    reactance_count: usize,
    resistance_label_stride: usize,
    reactance_label_stride: usize,
    x_label_at_r: f64,
    reactance_step: f64,
    show_unit_circle: bool,
    show_r1_highlight: bool,
    show_radial_lines: bool,
    resistance_color: Color,
    reactance_color: Color,
    radial_color: Color,
    unit_circle_color: Color,
    gamma_color: Color,
    r1_color: Color,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            outer_resistance_count: 7,
            inner_resistance_count: 7,
            reactance_count: 9,
            resistance_label_stride: 2,
            reactance_label_stride: 2,
            x_label_at_r: 1.0,
            reactance_step: 1.0,
            show_unit_circle: true,
            show_r1_highlight: true,
            show_radial_lines: true,
            resistance_color: DEFAULT_GRID_COLOR,
            reactance_color: DEFAULT_GRID_COLOR,
            radial_color: DEFAULT_GRID_COLOR,
            unit_circle_color: DEFAULT_GRID_COLOR,
            gamma_color: DEFAULT_GRID_COLOR,
            r1_color: DEFAULT_R1_COLOR,
        }
    }
}

impl GridParams {
    /// Number of constant-R circles with R ≥ 1.
    pub fn outer_resistance_count(&self) -> usize {
        self.outer_resistance_count
    }

    /// Number of constant-R circles with 0 < R ≤ 1.
    pub fn inner_resistance_count(&self) -> usize {
        self.inner_resistance_count
    }

    /// Number of reactance arcs per half-plane.
    pub fn reactance_count(&self) -> usize {
        self.reactance_count
    }

    /// Label every Nth resistance circle.
    pub fn resistance_label_stride(&self) -> usize {
        self.resistance_label_stride
    }

    /// Label every Nth reactance arc.
    pub fn reactance_label_stride(&self) -> usize {
        self.reactance_label_stride
    }

    /// Normalized resistance at which ±jX labels are anchored.
    pub fn x_label_at_r(&self) -> f64 {
        self.x_label_at_r
    }

    /// Spacing between consecutive reactance arcs.
    pub fn reactance_step(&self) -> f64 {
        self.reactance_step
    }

    /// Whether the unit circle is drawn.
    pub fn show_unit_circle(&self) -> bool {
        self.show_unit_circle
    }

    /// Whether the R = 1 circle is highlighted.
    pub fn show_r1_highlight(&self) -> bool {
        self.show_r1_highlight
    }

    /// Whether radial spokes and per-trace guides are drawn.
    pub fn show_radial_lines(&self) -> bool {
        self.show_radial_lines
    }

    /// Color of constant-R circles and their labels.
    pub fn resistance_color(&self) -> Color {
        self.resistance_color
    }

    /// Color of constant-X arcs and their labels.
    pub fn reactance_color(&self) -> Color {
        self.reactance_color
    }

    /// Color of radial spokes.
    pub fn radial_color(&self) -> Color {
        self.radial_color
    }

    /// Color of the unit circle.
    pub fn unit_circle_color(&self) -> Color {
        self.unit_circle_color
    }

    /// Color of Γ probe lines.
    pub fn gamma_color(&self) -> Color {
        self.gamma_color
    }

    /// Color of the R = 1 highlight.
    pub fn r1_color(&self) -> Color {
        self.r1_color
    }

    /// Set the shared grid color.
    ///
    /// Fans out to the resistance, reactance, unit-circle and Γ colors. The
    /// radial and R = 1 colors are left alone. Returns whether any color
    /// changed.
    pub fn set_grid_color(&mut self, color: Color) -> bool {
        let changed = [
            self.resistance_color,
            self.reactance_color,
            self.unit_circle_color,
            self.gamma_color,
        ]
        .iter()
        .any(|current| *current != color);
        self.resistance_color = color;
        self.reactance_color = color;
        self.unit_circle_color = color;
        self.gamma_color = color;
        changed
    }

    /// Resistances of the outer circles: 1, 2, …, N.
    pub fn outer_resistances(&self) -> impl Iterator<Item = f64> {
        (1..=self.outer_resistance_count).map(|r| r as f64)
    }

    /// Resistances of the inner circles: N values linearly spaced over (0, 1].
    pub fn inner_resistances(&self) -> impl Iterator<Item = f64> {
        steps_up_to(1.0, self.inner_resistance_count)
    }

    /// Reactances of the arcs: step, 2·step, …, N·step.
    ///
    /// The same magnitudes are used for +jX and −jX.
    pub fn reactances(&self) -> impl Iterator<Item = f64> {
        let step = self.reactance_step;
        (1..=self.reactance_count).map(move |k| k as f64 * step)
    }

    /// Apply a sparse update.
    ///
    /// Invalid fields keep their previous value; valid fields in the same
    /// update are still applied. The first rejection is reported.
    pub(crate) fn apply(&mut self, update: &GridUpdate) -> GridChange {
        let before = self.clone();
        let mut first_error = None;
        let mut reject = |error: GridError| {
            tracing::warn!(%error, "rejected grid value");
            first_error.get_or_insert(error);
        };

        let counts = [
            (
                "outer_resistance_count",
                update.outer_resistance_count,
                &mut self.outer_resistance_count,
            ),
            (
                "inner_resistance_count",
                update.inner_resistance_count,
                &mut self.inner_resistance_count,
            ),
            (
                "reactance_count",
                update.reactance_count,
                &mut self.reactance_count,
            ),
            (
                "resistance_label_stride",
                update.resistance_label_stride,
                &mut self.resistance_label_stride,
            ),
            (
                "reactance_label_stride",
                update.reactance_label_stride,
                &mut self.reactance_label_stride,
            ),
        ];
        for (field, value, slot) in counts {
            match value {
                Some(value) if value >= 1 => *slot = value,
                Some(value) => reject(GridError::CountTooSmall { field, value }),
                None => {}
            }
        }

        let lengths = [
            ("x_label_at_r", update.x_label_at_r, &mut self.x_label_at_r),
            (
                "reactance_step",
                update.reactance_step,
                &mut self.reactance_step,
            ),
        ];
        for (field, value, slot) in lengths {
            match value {
                Some(value) if value.is_finite() && value > 0.0 => *slot = value,
                Some(value) => reject(GridError::NotPositive { field, value }),
                None => {}
            }
        }

        if let Some(show) = update.show_unit_circle {
            self.show_unit_circle = show;
        }
        if let Some(show) = update.show_r1_highlight {
            self.show_r1_highlight = show;
        }
        if let Some(show) = update.show_radial_lines {
            self.show_radial_lines = show;
        }

        if let Some(color) = update.grid_color {
            self.set_grid_color(color);
        }
        let colors = [
            (update.resistance_color, &mut self.resistance_color),
            (update.reactance_color, &mut self.reactance_color),
            (update.radial_color, &mut self.radial_color),
            (update.unit_circle_color, &mut self.unit_circle_color),
            (update.gamma_color, &mut self.gamma_color),
            (update.r1_color, &mut self.r1_color),
        ];
        for (value, slot) in colors {
            if let Some(color) = value {
                *slot = color;
            }
        }

        GridChange {
            changed: *self != before,
            first_error,
        }
    }
}

/// Outcome of [`GridParams::apply`].
#[derive(Debug)]
pub(crate) struct GridChange {
    pub(crate) changed: bool,
    pub(crate) first_error: Option<GridError>,
}

/// Sparse update of [`GridParams`]; `None` fields are left untouched.
///
/// `grid_color` is applied before the individual colors, so an update that
/// sets both ends with the individual color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridUpdate {
    /// Number of constant-R circles with R ≥ 1.
    pub outer_resistance_count: Option<usize>,
    /// Number of constant-R circles with 0 < R ≤ 1.
    pub inner_resistance_count: Option<usize>,
    /// Number of reactance arcs per half-plane.
    pub reactance_count: Option<usize>,
    /// Label every Nth resistance circle.
    pub resistance_label_stride: Option<usize>,
    /// Label every Nth reactance arc.
    pub reactance_label_stride: Option<usize>,
    /// Normalized resistance at which ±jX labels are anchored.
    pub x_label_at_r: Option<f64>,
    /// Spacing between reactance arcs.
    pub reactance_step: Option<f64>,
    /// Unit circle toggle.
    pub show_unit_circle: Option<bool>,
    /// R = 1 highlight toggle.
    pub show_r1_highlight: Option<bool>,
    /// Radial lines toggle.
    pub show_radial_lines: Option<bool>,
    /// Shared grid color (four-way fan-out).
    pub grid_color: Option<Color>,
    /// Resistance color.
    pub resistance_color: Option<Color>,
    /// Reactance color.
    pub reactance_color: Option<Color>,
    /// Radial line color.
    pub radial_color: Option<Color>,
    /// Unit circle color.
    pub unit_circle_color: Option<Color>,
    /// Γ probe color.
    pub gamma_color: Option<Color>,
    /// R = 1 highlight color.
    pub r1_color: Option<Color>,
}

impl GridUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outer resistance circle count.
    pub fn outer_resistance_count(mut self, count: usize) -> Self {
        self.outer_resistance_count = Some(count);
        self
    }

    /// Set the inner resistance circle count.
    pub fn inner_resistance_count(mut self, count: usize) -> Self {
        self.inner_resistance_count = Some(count);
        self
    }

    /// Set the reactance arc count.
    pub fn reactance_count(mut self, count: usize) -> Self {
        self.reactance_count = Some(count);
        self
    }

    /// Set the resistance label stride.
    pub fn resistance_label_stride(mut self, stride: usize) -> Self {
        self.resistance_label_stride = Some(stride);
        self
    }

    /// Set the reactance label stride.
    pub fn reactance_label_stride(mut self, stride: usize) -> Self {
        self.reactance_label_stride = Some(stride);
        self
    }

    /// Set the reactance label radius.
    pub fn x_label_at_r(mut self, r: f64) -> Self {
        self.x_label_at_r = Some(r);
        self
    }

    /// Set the reactance step.
    pub fn reactance_step(mut self, step: f64) -> Self {
        self.reactance_step = Some(step);
        self
    }

    /// Toggle the unit circle.
    pub fn show_unit_circle(mut self, show: bool) -> Self {
        self.show_unit_circle = Some(show);
        self
    }

    /// Toggle the R = 1 highlight.
    pub fn show_r1_highlight(mut self, show: bool) -> Self {
        self.show_r1_highlight = Some(show);
        self
    }

    /// Toggle radial lines.
    pub fn show_radial_lines(mut self, show: bool) -> Self {
        self.show_radial_lines = Some(show);
        self
    }

    /// Set the shared grid color.
    pub fn grid_color(mut self, color: Color) -> Self {
        self.grid_color = Some(color);
        self
    }

    /// Set the resistance circle color.
    pub fn resistance_color(mut self, color: Color) -> Self {
        self.resistance_color = Some(color);
        self
    }

    /// Set the reactance arc color.
    pub fn reactance_color(mut self, color: Color) -> Self {
        self.reactance_color = Some(color);
        self
    }

    /// Set the unit circle color.
    pub fn unit_circle_color(mut self, color: Color) -> Self {
        self.unit_circle_color = Some(color);
        self
    }

    /// Set the radial line color.
    pub fn radial_color(mut self, color: Color) -> Self {
        self.radial_color = Some(color);
        self
    }

    /// Set the Γ probe color.
    pub fn gamma_color(mut self, color: Color) -> Self {
        self.gamma_color = Some(color);
        self
    }

    /// Set the R = 1 highlight color.
    pub fn r1_color(mut self, color: Color) -> Self {
        self.r1_color = Some(color);
        self
    }
}
