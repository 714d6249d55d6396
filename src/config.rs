/// Configuration for scene assembly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneConfig {
    circle_samples: usize,
    /// Margin around the unit disk in the scene viewport.
    pub viewport_margin: f64,
    /// Distance below the real axis at which resistance labels hang.
    pub resistance_label_offset: f64,
    /// Radial scale applied to Γ when placing a trace's annotation.
    pub annotation_scale: f64,
    /// Radius at which rim labels (λ probe, Γ angle) are placed.
    pub rim_label_radius: f64,
    /// Extra radius between the Γ angle label and the λ probe label.
    pub rim_label_spacing: f64,
    /// Half-width, in radians, of the chord used to orient reactance labels.
    pub tangent_step: f64,
}

impl SceneConfig {
    /// Samples taken around each reactance circle before clipping.
    pub fn circle_samples(&self) -> usize {
        self.circle_samples
    }

    /// Override the circle sample count (clamped to at least 8).
    pub fn with_circle_samples(mut self, samples: usize) -> Self {
        self.circle_samples = samples.max(8);
        self
    }

    /// Override the annotation scale.
    pub fn with_annotation_scale(mut self, scale: f64) -> Self {
        self.annotation_scale = scale;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            circle_samples: 600,
            viewport_margin: 0.12,
            resistance_label_offset: 0.03,
            annotation_scale: 1.1,
            rim_label_radius: 1.04,
            rim_label_spacing: 0.06,
            tangent_step: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_samples_have_a_floor() {
        assert_eq!(SceneConfig::default().circle_samples(), 600);
        assert_eq!(SceneConfig::default().with_circle_samples(0).circle_samples(), 8);
        assert_eq!(SceneConfig::default().with_circle_samples(64).circle_samples(), 64);
    }
}
