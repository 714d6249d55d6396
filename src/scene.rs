//! Scene assembly: grid parameters and traces in, ordered primitives out.

use std::f64::consts::TAU;

use num_complex::Complex64;

use crate::config::SceneConfig;
use crate::geom::{Circle, Point};
use crate::grid::GridParams;
use crate::render::{
    Layer, LineDash, LineStyle, MarkerShape, MarkerStyle, SceneDescription, ScenePrimitive,
    TextAnchor, TextStyle,
};
use crate::style::Theme;
use crate::trace::{ImpedanceTrace, TraceReadout};
use crate::transform::{
    admittance_point, clip_to_unit_disk, is_infinite, reactance_arc, reflection_coefficient,
    resistance_circle, swr_circle, swr_r1_intersections, tangent_angle,
};
use crate::view::Viewport;

pub(crate) fn build_scene<'a>(
    grid: &GridParams,
    traces: impl IntoIterator<Item = &'a ImpedanceTrace>,
    theme: &Theme,
    config: &SceneConfig,
) -> SceneDescription {
    let mut scene = SceneDescription::new(Viewport::chart(config.viewport_margin));

    build_resistance_circles(&mut scene, grid, theme);
    if grid.show_r1_highlight() {
        build_r1_highlight(&mut scene, grid, theme);
    }
    build_reactance_arcs(&mut scene, grid, theme, config);
    if grid.show_radial_lines() {
        build_radial_grid(&mut scene, grid, theme);
    }
    if grid.show_unit_circle() {
        scene.push(ScenePrimitive::Circle {
            layer: Layer::UnitCircle,
            circle: Circle::UNIT,
            style: LineStyle::solid(grid.unit_circle_color(), theme.highlight_width)
                .with_dash(LineDash::Dashed),
        });
    }
    build_resistance_labels(&mut scene, grid, theme, config);

    let mut legend = Vec::new();
    for trace in traces {
        let Some(readout) = trace.readout() else {
            tracing::debug!(trace = %trace.id(), "zero reference impedance, trace skipped");
            continue;
        };
        build_trace(&mut scene, grid, theme, config, trace, &readout);
        legend.push(ScenePrimitive::LegendEntry {
            trace: trace.id(),
            text: format!("{}: {}", trace.name(), readout),
            color: trace.color(),
        });
    }
    for entry in legend {
        scene.push(entry);
    }

    tracing::trace!(primitives = scene.len(), "scene assembled");
    scene
}

fn build_resistance_circles(scene: &mut SceneDescription, grid: &GridParams, theme: &Theme) {
    let style = LineStyle::solid(grid.resistance_color(), theme.grid_width);
    let outer = grid.outer_resistances().map(|r| (Layer::OuterResistance, r));
    let inner = grid.inner_resistances().map(|r| (Layer::InnerResistance, r));
    for (layer, r) in outer.chain(inner) {
        if let Some(circle) = resistance_circle(r) {
            scene.push(ScenePrimitive::Circle {
                layer,
                circle,
                style,
            });
        }
    }
}

fn build_r1_highlight(scene: &mut SceneDescription, grid: &GridParams, theme: &Theme) {
    if let Some(circle) = resistance_circle(1.0) {
        scene.push(ScenePrimitive::Circle {
            layer: Layer::R1Highlight,
            circle,
            style: LineStyle::solid(grid.r1_color(), theme.highlight_width),
        });
    }
}

fn build_reactance_arcs(
    scene: &mut SceneDescription,
    grid: &GridParams,
    theme: &Theme,
    config: &SceneConfig,
) {
    let style = LineStyle::solid(grid.reactance_color(), theme.grid_width);
    let text_style = TextStyle {
        color: grid.reactance_color(),
        size: theme.label_size,
        anchor: TextAnchor::Center,
    };
    let stride = grid.reactance_label_stride();
    for (index, x) in grid.reactances().enumerate() {
        let labelled = (index + 1) % stride == 0;
        for (sign, prefix) in [(1.0, '+'), (-1.0, '-')] {
            let Some(circle) = reactance_arc(sign * x) else {
                continue;
            };
            let segments = clip_to_unit_disk(&circle.sample(config.circle_samples()));
            scene.push(ScenePrimitive::Arc {
                layer: Layer::Reactance,
                circle,
                segments,
                style,
            });
            if !labelled {
                continue;
            }
            let anchor = Point::from(reflection_coefficient(Complex64::new(
                grid.x_label_at_r(),
                sign * x,
            )));
            let theta = circle.angle_of(anchor);
            let rotation = upright(tangent_angle(
                circle.point_at(theta - config.tangent_step),
                circle.point_at(theta + config.tangent_step),
            ));
            scene.push(ScenePrimitive::Label {
                layer: Layer::ReactanceLabel,
                text: format!("{prefix}j{x:.2}"),
                position: anchor,
                rotation,
                style: text_style,
            });
        }
    }
}

fn build_radial_grid(scene: &mut SceneDescription, grid: &GridParams, theme: &Theme) {
    let style =
        LineStyle::solid(grid.radial_color(), theme.grid_width).with_dash(LineDash::Dashed);
    let spokes = grid.reactance_count();
    for k in 0..spokes {
        let angle = TAU * k as f64 / spokes as f64;
        scene.push(ScenePrimitive::Line {
            layer: Layer::RadialGrid,
            start: Point::ORIGIN,
            end: Circle::UNIT.point_at(angle),
            style,
        });
    }
}

fn build_resistance_labels(
    scene: &mut SceneDescription,
    grid: &GridParams,
    theme: &Theme,
    config: &SceneConfig,
) {
    let style = TextStyle {
        color: grid.resistance_color(),
        size: theme.label_size,
        anchor: TextAnchor::Top,
    };
    let stride = grid.resistance_label_stride();
    let outer = grid.outer_resistances().map(|r| format!("{r:.0}"));
    let inner = grid.inner_resistances().map(|r| format!("{r:.2}"));
    let outer_values = grid.outer_resistances().zip(outer);
    let inner_values = grid.inner_resistances().zip(inner);
    for values in [
        outer_values.collect::<Vec<_>>(),
        inner_values.collect::<Vec<_>>(),
    ] {
        for (index, (r, text)) in values.into_iter().enumerate() {
            if (index + 1) % stride != 0 {
                continue;
            }
            scene.push(ScenePrimitive::Label {
                layer: Layer::ResistanceLabel,
                text,
                position: Point::new((r - 1.0) / (r + 1.0), -config.resistance_label_offset),
                rotation: 0.0,
                style,
            });
        }
    }
}

fn build_trace(
    scene: &mut SceneDescription,
    grid: &GridParams,
    theme: &Theme,
    config: &SceneConfig,
    trace: &ImpedanceTrace,
    readout: &TraceReadout,
) {
    let color = trace.color();
    let gamma = readout.gamma;
    let position = Point::from(gamma);
    let marker = ScenePrimitive::Marker {
        layer: Layer::TraceMarker,
        trace: Some(trace.id()),
        position,
        style: MarkerStyle {
            color,
            size: theme.marker_size,
            shape: MarkerShape::Circle,
        },
        legend: trace.name(),
    };
    if is_infinite(gamma) {
        // Renderers skip the sentinel marker; overlays have no geometry.
        scene.push(marker);
        return;
    }

    let trace_line = LineStyle::solid(color, theme.trace_width);
    if grid.show_radial_lines() {
        scene.push(ScenePrimitive::Line {
            layer: Layer::TraceGuide,
            start: Point::ORIGIN,
            end: position,
            style: trace_line.with_dash(LineDash::Dotted),
        });
    }
    scene.push(marker);

    let annotation_style = TextStyle {
        color,
        size: theme.annotation_size,
        anchor: TextAnchor::Center,
    };
    scene.push(ScenePrimitive::Label {
        layer: Layer::TraceAnnotation,
        text: format!("|Γ|={:.2}\n{:.1}°", readout.magnitude, readout.angle_deg),
        position: position.scaled(config.annotation_scale),
        rotation: 0.0,
        style: annotation_style,
    });

    let overlays = trace.overlays();
    if overlays.swr_circle {
        if let Some(circle) = swr_circle(gamma) {
            scene.push(ScenePrimitive::Circle {
                layer: Layer::SwrCircle,
                circle,
                style: trace_line.with_dash(LineDash::Dashed),
            });
        }
    }

    if overlays.admittance {
        scene.push(ScenePrimitive::Marker {
            layer: Layer::AdmittanceMarker,
            trace: Some(trace.id()),
            position: Point::from(admittance_point(gamma)),
            style: MarkerStyle {
                color,
                size: theme.marker_size,
                shape: MarkerShape::Square,
            },
            legend: format!("Y{}", trace.id()),
        });
    }

    let direction = readout.angle_deg.to_radians();
    if overlays.wavelength_probe {
        scene.push(ScenePrimitive::Line {
            layer: Layer::WavelengthProbe,
            start: position,
            end: Circle::UNIT.point_at(direction),
            style: LineStyle::solid(grid.gamma_color(), theme.trace_width)
                .with_dash(LineDash::Dashed),
        });
        scene.push(ScenePrimitive::Label {
            layer: Layer::WavelengthProbe,
            text: format!("{:.3}λ", readout.wavelengths_toward_generator),
            position: Circle::centered(config.rim_label_radius + config.rim_label_spacing)
                .point_at(direction),
            rotation: 0.0,
            style: TextStyle {
                color: grid.gamma_color(),
                ..annotation_style
            },
        });
    }

    if overlays.gamma_angle {
        scene.push(ScenePrimitive::Label {
            layer: Layer::GammaAngle,
            text: format!("{:.1}°", readout.angle_deg),
            position: Circle::centered(config.rim_label_radius).point_at(direction),
            rotation: 0.0,
            style: annotation_style,
        });
    }

    if overlays.swr_r1_intersections {
        if let Some((upper, lower)) = swr_r1_intersections(gamma) {
            for point in [upper, lower] {
                scene.push(ScenePrimitive::Marker {
                    layer: Layer::SwrR1Intersection,
                    trace: Some(trace.id()),
                    position: point,
                    style: MarkerStyle {
                        color,
                        size: theme.marker_size,
                        shape: MarkerShape::Cross,
                    },
                    legend: format!("{} SWR∩R=1", trace.name()),
                });
            }
        }
    }
}

/// Fold a text angle into (−90°, 90°] so labels never read upside down.
fn upright(mut degrees: f64) -> f64 {
    while degrees > 90.0 {
        degrees -= 180.0;
    }
    while degrees <= -90.0 {
        degrees += 180.0;
    }
    degrees
}
