//! Value ranges and the chart viewport.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Add padding around the range.
    pub fn padded(&self, padding: f64) -> Self {
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }
}

/// `count` values evenly spaced over `(0, max]`, ending exactly at `max`.
///
/// Spacing is linear. Constant-R circles built from these values crowd near
/// R = 0 on the chart, which is expected.
pub fn steps_up_to(max: f64, count: usize) -> impl Iterator<Item = f64> {
    (1..=count).map(move |k| max * k as f64 / count as f64)
}

/// Visible region of the Γ-plane on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Real axis range.
    pub x: Range,
    /// Imaginary axis range.
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// The unit disk plus a margin on every side.
    pub fn chart(margin: f64) -> Self {
        let unit = Range::new(-1.0, 1.0).padded(margin);
        Self::new(unit, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_include_upper_bound() {
        let steps: Vec<f64> = steps_up_to(1.0, 4).collect();
        assert_eq!(steps, vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(steps_up_to(1.0, 0).count(), 0);
    }

    #[test]
    fn chart_viewport_is_square() {
        let viewport = Viewport::chart(0.05);
        assert_eq!(viewport.x, viewport.y);
        assert!((viewport.x.min + 1.05).abs() < 1e-12);
        assert!((viewport.x.max - 1.05).abs() < 1e-12);
    }
}
