//! Chart state and its mutation API.

use std::collections::BTreeMap;

use crate::config::SceneConfig;
use crate::grid::{GridError, GridParams, GridUpdate};
use crate::render::{Color, SceneDescription};
use crate::scene::build_scene;
use crate::style::Theme;
use crate::trace::{ImpedanceTrace, TraceId, TraceReadout, TraceUpdate};

/// A Smith chart: grid parameters plus a set of impedance traces.
///
/// All mutation goes through `&mut self`; [`SmithChart::render_scene`] is a
/// pure query over the current state.
#[derive(Debug, Clone)]
pub struct SmithChart {
    theme: Theme,
    config: SceneConfig,
    grid: GridParams,
    traces: BTreeMap<TraceId, ImpedanceTrace>,
    next_id: u64,
    generation: u64,
    grid_generation: u64,
}

impl SmithChart {
    /// Create a chart with default configuration and no traces.
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            config: SceneConfig::default(),
            grid: GridParams::default(),
            traces: BTreeMap::new(),
            next_id: 0,
            generation: 0,
            grid_generation: 0,
        }
    }

    /// Start building a chart with custom configuration.
    pub fn builder() -> ChartBuilder {
        ChartBuilder::default()
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Access the scene configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Access the grid parameters.
    pub fn grid(&self) -> &GridParams {
        &self.grid
    }

    /// Counter bumped by every successful mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Counter bumped when the grid geometry (counts, step, label placement)
    /// changes. Renderers may key cached grid geometry on it.
    pub fn grid_generation(&self) -> u64 {
        self.grid_generation
    }

    /// Apply a sparse grid update.
    ///
    /// Valid fields are applied even when another field in the same update is
    /// rejected; the error names the first rejected field.
    pub fn set_grid(&mut self, update: GridUpdate) -> Result<(), GridError> {
        let geometry = GridGeometry::of(&self.grid);
        let change = self.grid.apply(&update);
        if change.changed {
            self.generation += 1;
            if GridGeometry::of(&self.grid) != geometry {
                self.grid_generation += 1;
            }
            tracing::debug!(generation = self.generation, "grid updated");
        }
        match change.first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Set the shared grid color (resistance, reactance, unit circle and Γ).
    pub fn set_grid_color(&mut self, color: Color) {
        if !self.grid.set_grid_color(color) {
            return;
        }
        self.generation += 1;
        tracing::debug!(color = %color.to_hex(), "grid color set");
    }

    /// Add a trace with default impedances and the next palette color.
    pub fn register_trace(&mut self) -> TraceId {
        let id = TraceId::new(self.next_id);
        let color = self.theme.palette_color(self.next_id);
        self.next_id += 1;
        self.traces.insert(id, ImpedanceTrace::new(id, color));
        self.generation += 1;
        tracing::debug!(trace = %id, "trace registered");
        id
    }

    /// Apply a sparse update to a trace. Returns `false` for unknown ids.
    pub fn update_trace(&mut self, id: TraceId, update: TraceUpdate) -> bool {
        let Some(trace) = self.traces.get_mut(&id) else {
            tracing::debug!(trace = %id, "update ignored for unknown trace");
            return false;
        };
        trace.apply(&update);
        self.generation += 1;
        tracing::debug!(trace = %id, "trace updated");
        true
    }

    /// Remove a trace. Returns `false` for unknown ids.
    pub fn remove_trace(&mut self, id: TraceId) -> bool {
        if self.traces.remove(&id).is_none() {
            tracing::debug!(trace = %id, "remove ignored for unknown trace");
            return false;
        }
        self.generation += 1;
        tracing::debug!(trace = %id, "trace removed");
        true
    }

    /// Flip the SWR circle flag of one trace. Returns `false` for unknown ids.
    pub fn toggle_swr_circle(&mut self, id: TraceId) -> bool {
        let Some(trace) = self.traces.get_mut(&id) else {
            tracing::debug!(trace = %id, "toggle ignored for unknown trace");
            return false;
        };
        trace.toggle_swr_circle();
        self.generation += 1;
        tracing::debug!(
            trace = %id,
            show = trace.overlays().swr_circle,
            "swr circle toggled"
        );
        true
    }

    /// Look up a trace.
    pub fn trace(&self, id: TraceId) -> Option<&ImpedanceTrace> {
        self.traces.get(&id)
    }

    /// Iterate over traces in creation order.
    pub fn traces(&self) -> impl Iterator<Item = &ImpedanceTrace> {
        self.traces.values()
    }

    /// Number of live traces.
    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    /// Derived values for a trace, if it exists and has a usable reference.
    pub fn readout(&self, id: TraceId) -> Option<TraceReadout> {
        self.traces.get(&id)?.readout()
    }

    /// Build the primitives for the current state.
    pub fn render_scene(&self) -> SceneDescription {
        build_scene(&self.grid, self.traces.values(), &self.theme, &self.config)
    }
}

impl Default for SmithChart {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq)]
struct GridGeometry {
    counts: [usize; 5],
    x_label_at_r: f64,
    reactance_step: f64,
}

impl GridGeometry {
    fn of(grid: &GridParams) -> Self {
        Self {
            counts: [
                grid.outer_resistance_count(),
                grid.inner_resistance_count(),
                grid.reactance_count(),
                grid.resistance_label_stride(),
                grid.reactance_label_stride(),
            ],
            x_label_at_r: grid.x_label_at_r(),
            reactance_step: grid.reactance_step(),
        }
    }
}

/// Builder for configuring a chart before construction.
#[derive(Debug, Default)]
pub struct ChartBuilder {
    theme: Theme,
    config: SceneConfig,
    grid: GridUpdate,
}

impl ChartBuilder {
    /// Set the theme used by the chart.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the scene configuration.
    pub fn config(mut self, config: SceneConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial grid, as an update over the defaults.
    pub fn grid(mut self, update: GridUpdate) -> Self {
        self.grid = update;
        self
    }

    /// Build the chart. Fails if any grid field is out of range.
    pub fn build(self) -> Result<SmithChart, GridError> {
        let mut grid = GridParams::default();
        if let Some(error) = grid.apply(&self.grid).first_error {
            return Err(error);
        }
        Ok(SmithChart {
            theme: self.theme,
            config: self.config,
            grid,
            ..SmithChart::new()
        })
    }
}
