//! Geometric primitives in the reflection-coefficient plane.
//!
//! All coordinates are normalized: the chart's outer rim is the unit circle
//! centered on the origin. Pixel mapping belongs to render backends.

use num_complex::Complex64;

/// A point in the Γ-plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Real part of Γ.
    pub x: f64,
    /// Imaginary part of Γ.
    pub y: f64,
}

impl Point {
    /// The chart center (Γ = 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared distance from the origin.
    pub fn norm_sqr(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Distance to another point.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Scale the point away from the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl From<Complex64> for Point {
    fn from(value: Complex64) -> Self {
        Self::new(value.re, value.im)
    }
}

impl From<Point> for Complex64 {
    fn from(value: Point) -> Self {
        Complex64::new(value.x, value.y)
    }
}

/// A circle in the Γ-plane.
///
/// Grid loci, SWR circles and the unit circle are all described this way;
/// arcs are circles whose drawable part has been clipped to the unit disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Circle center.
    pub center: Point,
    /// Circle radius.
    pub radius: f64,
}

impl Circle {
    /// The chart rim, |Γ| = 1.
    pub const UNIT: Self = Self::new(Point::ORIGIN, 1.0);

    /// Create a new circle.
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Circle of constant |Γ| centered on the origin.
    pub fn centered(radius: f64) -> Self {
        Self::new(Point::ORIGIN, radius)
    }

    /// Point on the circle at the given angle (radians, counter-clockwise
    /// from the positive real axis).
    pub fn point_at(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(
            self.center.x + self.radius * cos,
            self.center.y + self.radius * sin,
        )
    }

    /// Angle of a point as seen from the circle center, in radians.
    pub fn angle_of(&self, point: Point) -> f64 {
        (point.y - self.center.y).atan2(point.x - self.center.x)
    }

    /// Sample the full circle with `samples` evenly spaced points.
    ///
    /// The first and last samples coincide so the path is closed.
    pub fn sample(&self, samples: usize) -> Vec<Point> {
        if samples < 2 {
            return Vec::new();
        }
        let step = std::f64::consts::TAU / (samples - 1) as f64;
        (0..samples)
            .map(|i| self.point_at(step * i as f64))
            .collect()
    }

    /// Check whether center and radius are finite.
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sampled_circle_is_closed() {
        let circle = Circle::new(Point::new(0.5, 0.0), 0.5);
        let points = circle.sample(64);
        assert_eq!(points.len(), 64);
        let first = points[0];
        let last = points[63];
        assert_relative_eq!(first.x, last.x, epsilon = 1e-12);
        assert_relative_eq!(first.y, last.y, epsilon = 1e-12);
        for point in points {
            assert_relative_eq!(point.distance(circle.center), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn degenerate_sample_count_is_empty() {
        assert!(Circle::UNIT.sample(1).is_empty());
    }

    #[test]
    fn angle_roundtrip() {
        let circle = Circle::new(Point::new(1.0, 1.0), 1.0);
        let point = circle.point_at(1.2);
        assert_relative_eq!(circle.angle_of(point), 1.2, epsilon = 1e-12);
    }
}
