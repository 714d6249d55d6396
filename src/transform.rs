//! Impedance, reflection-coefficient and SWR transforms, plus the closed-form
//! Smith chart loci.
//!
//! Nothing here panics on degenerate input. Division by zero produces the
//! infinity sentinel (see [`INFINITE`]) and impossible loci produce `None`,
//! so callers branch instead of catching.

use num_complex::Complex64;

use crate::geom::{Circle, Point};

/// Tolerance used when deciding whether a point lies inside the unit disk.
pub const DISK_TOLERANCE: f64 = 1e-6;

/// Sentinel for results of infinite magnitude.
pub const INFINITE: Complex64 = Complex64::new(f64::INFINITY, 0.0);

/// Check whether a complex value carries the infinity sentinel (or any other
/// non-finite component).
pub fn is_infinite(value: Complex64) -> bool {
    !value.is_finite()
}

/// Reciprocal with a signed infinity for exact zero.
///
/// `num_complex` yields NaN for `1 / 0`; a cleared admittance field must turn
/// into an open circuit instead.
pub fn reciprocal(value: Complex64) -> Complex64 {
    if value.re == 0.0 && value.im == 0.0 {
        return Complex64::new(f64::INFINITY.copysign(value.re), 0.0);
    }
    if is_infinite(value) {
        if value.re.is_nan() || value.im.is_nan() {
            return Complex64::new(f64::NAN, f64::NAN);
        }
        return Complex64::new(0.0, 0.0);
    }
    value.inv()
}

/// Normalize an impedance against a reference impedance.
///
/// Returns `None` when the reference is zero or not finite, which leaves the
/// trace's geometry undefined. An infinite load normalizes to [`INFINITE`].
pub fn normalize(impedance: Complex64, reference: Complex64) -> Option<Complex64> {
    if reference.norm_sqr() == 0.0 || is_infinite(reference) {
        return None;
    }
    if impedance.re.is_nan() || impedance.im.is_nan() {
        return None;
    }
    if is_infinite(impedance) {
        return Some(INFINITE);
    }
    Some(impedance / reference)
}

/// Γ = (z − 1) / (z + 1) for a normalized impedance.
///
/// z = −1 returns [`INFINITE`]. An open circuit (infinite z) maps onto Γ = 1.
pub fn reflection_coefficient(z_norm: Complex64) -> Complex64 {
    if z_norm.re.is_nan() || z_norm.im.is_nan() {
        return INFINITE;
    }
    if is_infinite(z_norm) {
        return Complex64::new(1.0, 0.0);
    }
    let denom = z_norm + 1.0;
    if denom.norm_sqr() == 0.0 {
        return INFINITE;
    }
    (z_norm - 1.0) / denom
}

/// Inverse transform: z = (1 + Γ) / (1 − Γ).
///
/// Γ = 1 is an open circuit and returns [`INFINITE`].
pub fn normalized_impedance(gamma: Complex64) -> Complex64 {
    if is_infinite(gamma) {
        return Complex64::new(-1.0, 0.0);
    }
    let denom = Complex64::new(1.0, 0.0) - gamma;
    if denom.norm_sqr() == 0.0 {
        return INFINITE;
    }
    (gamma + 1.0) / denom
}

/// SWR = (1 + |Γ|) / (1 − |Γ|), infinite for |Γ| ≥ 1.
pub fn swr(gamma: Complex64) -> f64 {
    if is_infinite(gamma) {
        return f64::INFINITY;
    }
    let magnitude = gamma.norm();
    if magnitude >= 1.0 {
        return f64::INFINITY;
    }
    (1.0 + magnitude) / (1.0 - magnitude)
}

/// Γ angle in degrees in (−180, 180]; 0 when undefined.
pub fn angle_degrees(gamma: Complex64) -> f64 {
    if is_infinite(gamma) {
        return 0.0;
    }
    let angle = gamma.arg().to_degrees();
    if angle.is_nan() { 0.0 } else { angle }
}

/// Electrical distance from the load toward the generator, in wavelengths,
/// read on the chart's outer scale. Always in `[0, 0.5)`.
pub fn wavelengths_toward_generator(gamma: Complex64) -> f64 {
    let wtg = (180.0 - angle_degrees(gamma)) / 720.0;
    wtg.rem_euclid(0.5)
}

/// Electrical distance toward the load, the complement of
/// [`wavelengths_toward_generator`] on the half-wavelength scale.
pub fn wavelengths_toward_load(gamma: Complex64) -> f64 {
    (0.5 - wavelengths_toward_generator(gamma)).rem_euclid(0.5)
}

/// Normalized admittance point for a reflection coefficient: Γ_y = −Γ.
pub fn admittance_point(gamma: Complex64) -> Complex64 {
    -gamma
}

/// Constant-resistance locus: center (r/(r+1), 0), radius 1/(r+1).
///
/// r = 0 is the unit circle itself. Negative or non-finite resistances have
/// no locus on the chart.
pub fn resistance_circle(r: f64) -> Option<Circle> {
    if !r.is_finite() || r < 0.0 {
        return None;
    }
    let denom = r + 1.0;
    Some(Circle::new(Point::new(r / denom, 0.0), 1.0 / denom))
}

/// Constant-reactance locus: center (1, 1/x), radius |1/x|.
///
/// Positive x lies in the upper half of the chart, negative x in the lower
/// half. x = 0 is the real axis, not a circle, and returns `None`.
pub fn reactance_arc(x: f64) -> Option<Circle> {
    if !x.is_finite() || x == 0.0 {
        return None;
    }
    let inv = 1.0 / x;
    Some(Circle::new(Point::new(1.0, inv), inv.abs()))
}

/// Constant-|Γ| circle for a reflection coefficient.
pub fn swr_circle(gamma: Complex64) -> Option<Circle> {
    if is_infinite(gamma) {
        return None;
    }
    Some(Circle::centered(gamma.norm()))
}

/// Points where the constant-|Γ| circle meets the R = 1 circle.
///
/// Returns the upper intersection first. Loads with |Γ| > 1 never meet it.
pub fn swr_r1_intersections(gamma: Complex64) -> Option<(Point, Point)> {
    if is_infinite(gamma) {
        return None;
    }
    let m = gamma.norm();
    if m > 1.0 {
        return None;
    }
    let x = m * m;
    let y = m * (1.0 - x).max(0.0).sqrt();
    Some((Point::new(x, y), Point::new(x, -y)))
}

/// Split a path into the contiguous runs lying inside the unit disk.
///
/// A path that leaves and re-enters the disk yields several runs, in order,
/// so arcs never get drawn as chords across the chart.
pub fn clip_to_unit_disk(points: &[Point]) -> Vec<Vec<Point>> {
    let limit = 1.0 + DISK_TOLERANCE;
    let mut segments = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for point in points {
        if point.is_finite() && point.norm_sqr() <= limit {
            current.push(*point);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Angle in degrees of the vector from `p1` to `p2`.
pub fn tangent_angle(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x).to_degrees()
}
