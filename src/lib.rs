//! smithchart computes Smith chart geometry and keeps multi-trace chart state.
//! Rendering is left to the caller, which consumes a backend-agnostic scene.

#![forbid(unsafe_code)]

pub mod chart;
pub mod config;
pub mod geom;
pub mod grid;
pub mod render;
mod scene;
pub mod style;
pub mod trace;
pub mod transform;
pub mod view;

pub use chart::{ChartBuilder, SmithChart};
pub use config::SceneConfig;
pub use geom::{Circle, Point};
pub use grid::{GridError, GridParams, GridUpdate};
pub use num_complex::Complex64;
pub use render::{
    Color, ColorParseError, Layer, LineDash, LineStyle, MarkerShape, MarkerStyle,
    SceneDescription, ScenePrimitive, TextAnchor, TextStyle,
};
pub use style::Theme;
pub use trace::{
    Authority, ImpedanceTrace, Immittance, TraceId, TraceOverlays, TraceReadout, TraceUpdate,
};
pub use view::{Range, Viewport};
