//! Impedance traces: load and reference impedances with their display state.

use std::fmt;

use num_complex::Complex64;

use crate::render::Color;
use crate::transform::{
    angle_degrees, normalize, reciprocal, reflection_coefficient, swr,
    wavelengths_toward_generator, wavelengths_toward_load,
};

/// Default load and reference impedance, in ohms.
pub const DEFAULT_IMPEDANCE: Complex64 = Complex64::new(50.0, 0.0);

/// Unique identifier for a trace.
///
/// Identifiers are assigned in increasing order and never reused by the
/// chart that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceId(u64);

impl TraceId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of a reciprocal pair the user entered last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Authority {
    /// The impedance was entered; the admittance is derived.
    Impedance,
    /// The admittance was entered; the impedance is derived.
    Admittance,
}

/// An impedance and its admittance, kept reciprocal.
///
/// Serialized as the entered side and its authority; the derived side, which
/// may be infinite, is recomputed on load.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "StoredImmittance", into = "StoredImmittance")
)]
pub struct Immittance {
    impedance: Complex64,
    admittance: Complex64,
    authority: Authority,
}

impl Immittance {
    /// Pair defined by an impedance.
    pub fn from_impedance(impedance: Complex64) -> Self {
        Self {
            impedance,
            admittance: reciprocal(impedance),
            authority: Authority::Impedance,
        }
    }

    /// Pair defined by an admittance.
    pub fn from_admittance(admittance: Complex64) -> Self {
        Self {
            impedance: reciprocal(admittance),
            admittance,
            authority: Authority::Admittance,
        }
    }

    /// Impedance in ohms.
    pub fn impedance(&self) -> Complex64 {
        self.impedance
    }

    /// Admittance in siemens.
    pub fn admittance(&self) -> Complex64 {
        self.admittance
    }

    /// The admittance, only if the user entered it.
    pub fn entered_admittance(&self) -> Option<Complex64> {
        match self.authority {
            Authority::Admittance => Some(self.admittance),
            Authority::Impedance => None,
        }
    }

    /// Side that was entered last.
    pub fn authority(&self) -> Authority {
        self.authority
    }

    /// Apply an edit to either side.
    ///
    /// A non-zero admittance wins and is kept verbatim. Otherwise a supplied
    /// impedance wins. A zero admittance on its own hands authority back to
    /// the current impedance.
    pub(crate) fn edit(&mut self, impedance: Option<Complex64>, admittance: Option<Complex64>) {
        match (impedance, admittance) {
            (_, Some(y)) if y.norm_sqr() != 0.0 => *self = Self::from_admittance(y),
            (Some(z), _) => *self = Self::from_impedance(z),
            (None, Some(_)) => *self = Self::from_impedance(self.impedance),
            (None, None) => {}
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct StoredImmittance {
    authority: Authority,
    value: Complex64,
}

#[cfg(feature = "serde")]
impl From<Immittance> for StoredImmittance {
    fn from(pair: Immittance) -> Self {
        let value = match pair.authority {
            Authority::Impedance => pair.impedance,
            Authority::Admittance => pair.admittance,
        };
        Self {
            authority: pair.authority,
            value,
        }
    }
}

#[cfg(feature = "serde")]
impl From<StoredImmittance> for Immittance {
    fn from(stored: StoredImmittance) -> Self {
        match stored.authority {
            Authority::Impedance => Self::from_impedance(stored.value),
            Authority::Admittance => Self::from_admittance(stored.value),
        }
    }
}

/// Overlay toggles for one trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceOverlays {
    /// Constant-|Γ| circle.
    pub swr_circle: bool,
    /// Normalized admittance point.
    pub admittance: bool,
    /// λ-toward-generator probe.
    pub wavelength_probe: bool,
    /// Γ angle on the rim.
    pub gamma_angle: bool,
    /// Intersections of the SWR circle with R = 1.
    pub swr_r1_intersections: bool,
}

/// One user-visible load definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpedanceTrace {
    id: TraceId,
    load: Immittance,
    reference: Immittance,
    color: Color,
    color_overridden: bool,
    overlays: TraceOverlays,
}

impl ImpedanceTrace {
    pub(crate) fn new(id: TraceId, color: Color) -> Self {
        Self {
            id,
            load: Immittance::from_impedance(DEFAULT_IMPEDANCE),
            reference: Immittance::from_impedance(DEFAULT_IMPEDANCE),
            color,
            color_overridden: false,
            overlays: TraceOverlays::default(),
        }
    }

    /// Access the trace identifier.
    pub fn id(&self) -> TraceId {
        self.id
    }

    /// Legend name, `Z{id}`.
    pub fn name(&self) -> String {
        format!("Z{}", self.id)
    }

    /// Load impedance/admittance pair.
    pub fn load(&self) -> &Immittance {
        &self.load
    }

    /// Reference impedance/admittance pair.
    pub fn reference(&self) -> &Immittance {
        &self.reference
    }

    /// Display color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether the color was set explicitly instead of taken from the palette.
    pub fn color_overridden(&self) -> bool {
        self.color_overridden
    }

    /// Overlay toggles.
    pub fn overlays(&self) -> TraceOverlays {
        self.overlays
    }

    /// Load impedance normalized to the reference; `None` when Z₀ is zero.
    pub fn normalized_impedance(&self) -> Option<Complex64> {
        normalize(self.load.impedance(), self.reference.impedance())
    }

    /// Derived values, recomputed on every call.
    pub fn readout(&self) -> Option<TraceReadout> {
        self.normalized_impedance().map(TraceReadout::from_normalized)
    }

    pub(crate) fn apply(&mut self, update: &TraceUpdate) {
        self.load.edit(update.load_impedance, update.load_admittance);
        self.reference
            .edit(update.reference_impedance, update.reference_admittance);
        if let Some(color) = update.color {
            self.color = color;
            self.color_overridden = true;
        }
        let overlays = [
            (update.show_swr_circle, &mut self.overlays.swr_circle),
            (update.show_admittance, &mut self.overlays.admittance),
            (
                update.show_wavelength_probe,
                &mut self.overlays.wavelength_probe,
            ),
            (update.show_gamma_angle, &mut self.overlays.gamma_angle),
            (
                update.show_swr_r1_intersections,
                &mut self.overlays.swr_r1_intersections,
            ),
        ];
        for (value, slot) in overlays {
            if let Some(show) = value {
                *slot = show;
            }
        }
    }

    pub(crate) fn toggle_swr_circle(&mut self) {
        self.overlays.swr_circle = !self.overlays.swr_circle;
    }
}

/// Sparse update of an [`ImpedanceTrace`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceUpdate {
    /// Load impedance Z_L.
    pub load_impedance: Option<Complex64>,
    /// Load admittance Y_L.
    pub load_admittance: Option<Complex64>,
    /// Reference impedance Z₀.
    pub reference_impedance: Option<Complex64>,
    /// Reference admittance Y₀.
    pub reference_admittance: Option<Complex64>,
    /// Display color override.
    pub color: Option<Color>,
    /// SWR circle toggle.
    pub show_swr_circle: Option<bool>,
    /// Admittance point toggle.
    pub show_admittance: Option<bool>,
    /// λ-toward-generator probe toggle.
    pub show_wavelength_probe: Option<bool>,
    /// Γ angle label toggle.
    pub show_gamma_angle: Option<bool>,
    /// SWR ∩ R = 1 markers toggle.
    pub show_swr_r1_intersections: Option<bool>,
}

impl TraceUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Z_L.
    pub fn load_impedance(mut self, z: Complex64) -> Self {
        self.load_impedance = Some(z);
        self
    }

    /// Set Y_L.
    pub fn load_admittance(mut self, y: Complex64) -> Self {
        self.load_admittance = Some(y);
        self
    }

    /// Set Z₀.
    pub fn reference_impedance(mut self, z: Complex64) -> Self {
        self.reference_impedance = Some(z);
        self
    }

    /// Set Y₀.
    pub fn reference_admittance(mut self, y: Complex64) -> Self {
        self.reference_admittance = Some(y);
        self
    }

    /// Override the display color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Toggle the SWR circle.
    pub fn show_swr_circle(mut self, show: bool) -> Self {
        self.show_swr_circle = Some(show);
        self
    }

    /// Toggle the admittance point.
    pub fn show_admittance(mut self, show: bool) -> Self {
        self.show_admittance = Some(show);
        self
    }

    /// Toggle the λ-toward-generator probe.
    pub fn show_wavelength_probe(mut self, show: bool) -> Self {
        self.show_wavelength_probe = Some(show);
        self
    }

    /// Toggle the Γ angle label.
    pub fn show_gamma_angle(mut self, show: bool) -> Self {
        self.show_gamma_angle = Some(show);
        self
    }

    /// Toggle the SWR ∩ R = 1 markers.
    pub fn show_swr_r1_intersections(mut self, show: bool) -> Self {
        self.show_swr_r1_intersections = Some(show);
        self
    }
}

/// Values derived from a trace's impedances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceReadout {
    /// z = Z_L / Z₀.
    pub z_norm: Complex64,
    /// Reflection coefficient; may be the infinity sentinel.
    pub gamma: Complex64,
    /// |Γ|.
    pub magnitude: f64,
    /// ∠Γ in degrees, 0 when undefined.
    pub angle_deg: f64,
    /// Standing-wave ratio; infinite for |Γ| ≥ 1.
    pub swr: f64,
    /// Wavelengths toward the generator on the outer scale.
    pub wavelengths_toward_generator: f64,
    /// Wavelengths toward the load on the outer scale.
    pub wavelengths_toward_load: f64,
}

impl TraceReadout {
    /// Derive all values from a normalized impedance.
    pub fn from_normalized(z_norm: Complex64) -> Self {
        let gamma = reflection_coefficient(z_norm);
        Self {
            z_norm,
            gamma,
            magnitude: gamma.norm(),
            angle_deg: angle_degrees(gamma),
            swr: swr(gamma),
            wavelengths_toward_generator: wavelengths_toward_generator(gamma),
            wavelengths_toward_load: wavelengths_toward_load(gamma),
        }
    }
}

impl fmt::Display for TraceReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Γ = {:.2} ∠ {:.1}°, SWR = {:.2}",
            self.magnitude, self.angle_deg, self.swr
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn trace() -> ImpedanceTrace {
        ImpedanceTrace::new(TraceId::new(0), Color::BLACK)
    }

    #[test]
    fn defaults_are_matched() {
        let trace = trace();
        assert_eq!(trace.load().impedance(), DEFAULT_IMPEDANCE);
        assert_eq!(trace.reference().impedance(), DEFAULT_IMPEDANCE);
        assert_relative_eq!(trace.load().admittance().re, 0.02);
        assert_eq!(trace.load().entered_admittance(), None);
        assert!(!trace.overlays().swr_circle);
        let readout = trace.readout().expect("finite reference");
        assert_eq!(readout.swr, 1.0);
    }

    #[test]
    fn non_zero_admittance_wins() {
        let mut trace = trace();
        let y = Complex64::new(0.01, 0.0);
        trace.apply(
            &TraceUpdate::new()
                .load_impedance(Complex64::new(75.0, 0.0))
                .load_admittance(y),
        );
        assert_eq!(trace.load().admittance(), y);
        assert_relative_eq!(trace.load().impedance().re, 100.0, epsilon = 1e-9);
        assert_eq!(trace.load().authority(), Authority::Admittance);
    }

    #[test]
    fn zero_admittance_defers_to_impedance() {
        let mut trace = trace();
        trace.apply(&TraceUpdate::new().load_admittance(Complex64::new(0.01, 0.0)));
        trace.apply(
            &TraceUpdate::new()
                .load_impedance(Complex64::new(25.0, 0.0))
                .load_admittance(Complex64::new(0.0, 0.0)),
        );
        assert_eq!(trace.load().impedance(), Complex64::new(25.0, 0.0));
        assert_eq!(trace.load().authority(), Authority::Impedance);
    }

    #[test]
    fn clearing_admittance_keeps_derived_impedance() {
        let mut trace = trace();
        trace.apply(&TraceUpdate::new().reference_admittance(Complex64::new(0.04, 0.0)));
        assert_relative_eq!(trace.reference().impedance().re, 25.0, epsilon = 1e-9);
        trace.apply(&TraceUpdate::new().reference_admittance(Complex64::new(0.0, 0.0)));
        assert_relative_eq!(trace.reference().impedance().re, 25.0, epsilon = 1e-9);
        assert_eq!(trace.reference().entered_admittance(), None);
    }

    #[test]
    fn zero_impedance_derives_infinite_admittance() {
        let mut trace = trace();
        trace.apply(&TraceUpdate::new().load_impedance(Complex64::new(0.0, 0.0)));
        assert!(trace.load().admittance().re.is_infinite());
        let readout = trace.readout().expect("finite reference");
        assert_relative_eq!(readout.gamma.re, -1.0);
    }

    #[test]
    fn zero_reference_has_no_readout() {
        let mut trace = trace();
        trace.apply(&TraceUpdate::new().reference_impedance(Complex64::new(0.0, 0.0)));
        assert!(trace.readout().is_none());
    }

    #[test]
    fn color_override_is_remembered() {
        let mut trace = trace();
        trace.apply(&TraceUpdate::new().color(Color::WHITE));
        assert_eq!(trace.color(), Color::WHITE);
        assert!(trace.color_overridden());
    }

    #[test]
    fn readout_display() {
        let readout = TraceReadout::from_normalized(Complex64::new(2.0, 0.0));
        assert_eq!(readout.to_string(), "Γ = 0.33 ∠ 0.0°, SWR = 2.00");
    }
}
