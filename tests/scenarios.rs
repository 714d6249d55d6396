use approx::assert_relative_eq;
use smithchart::{
    Complex64, GridUpdate, Layer, ScenePrimitive, SmithChart, TraceId, TraceUpdate,
};

fn load_on_50_ohms(chart: &mut SmithChart, load: Complex64) -> TraceId {
    let id = chart.register_trace();
    assert!(chart.update_trace(
        id,
        TraceUpdate::new()
            .load_impedance(load)
            .reference_impedance(Complex64::new(50.0, 0.0)),
    ));
    id
}

fn marker_owners(chart: &SmithChart) -> Vec<TraceId> {
    chart
        .render_scene()
        .layer(Layer::TraceMarker)
        .filter_map(|primitive| match primitive {
            ScenePrimitive::Marker { trace, .. } => *trace,
            _ => None,
        })
        .collect()
}

#[test]
fn matched_load_sits_at_center() {
    let mut chart = SmithChart::new();
    let id = load_on_50_ohms(&mut chart, Complex64::new(50.0, 0.0));
    let readout = chart.readout(id).expect("finite reference");
    assert_relative_eq!(readout.gamma.re, 0.0);
    assert_relative_eq!(readout.gamma.im, 0.0);
    assert_relative_eq!(readout.swr, 1.0);
    assert_eq!(
        readout.to_string(),
        "Γ = 0.00 ∠ 0.0°, SWR = 1.00"
    );
}

#[test]
fn resistive_mismatch_gives_swr_two() {
    let mut chart = SmithChart::new();
    let id = load_on_50_ohms(&mut chart, Complex64::new(100.0, 0.0));
    let readout = chart.readout(id).expect("finite reference");
    assert_relative_eq!(readout.z_norm.re, 2.0);
    assert_relative_eq!(readout.z_norm.im, 0.0);
    assert_relative_eq!(readout.gamma.re, 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(readout.gamma.im, 0.0);
    assert_relative_eq!(readout.swr, 2.0, epsilon = 1e-12);
}

#[test]
fn pure_reactance_lies_on_rim() {
    let mut chart = SmithChart::new();
    let id = load_on_50_ohms(&mut chart, Complex64::new(0.0, 50.0));
    let readout = chart.readout(id).expect("finite reference");
    assert_relative_eq!(readout.z_norm.im, 1.0);
    assert_relative_eq!(readout.gamma.re, 0.0, epsilon = 1e-12);
    assert_relative_eq!(readout.gamma.im, 1.0, epsilon = 1e-12);
    assert_relative_eq!(readout.magnitude, 1.0, epsilon = 1e-12);
    assert_relative_eq!(readout.angle_deg, 90.0, epsilon = 1e-9);
    assert!(readout.swr.is_infinite());
}

#[test]
fn three_outer_circles_after_grid_change() {
    let mut chart = SmithChart::new();
    chart
        .set_grid(GridUpdate::new().outer_resistance_count(3))
        .expect("valid update");
    let scene = chart.render_scene();
    let circles: Vec<_> = scene
        .layer(Layer::OuterResistance)
        .filter_map(|primitive| match primitive {
            ScenePrimitive::Circle { circle, .. } => Some(*circle),
            _ => None,
        })
        .collect();
    assert_eq!(circles.len(), 3);
    let expected = [(0.5, 0.5), (2.0 / 3.0, 1.0 / 3.0), (0.75, 0.25)];
    for (circle, (center, radius)) in circles.iter().zip(expected) {
        assert_relative_eq!(circle.center.x, center, epsilon = 1e-12);
        assert_relative_eq!(circle.center.y, 0.0);
        assert_relative_eq!(circle.radius, radius, epsilon = 1e-12);
    }
}

#[test]
fn removed_trace_stays_removed() {
    let mut chart = SmithChart::new();
    let keep = chart.register_trace();
    let gone = chart.register_trace();
    assert!(chart.remove_trace(gone));
    assert!(!chart.update_trace(
        gone,
        TraceUpdate::new().load_impedance(Complex64::new(10.0, 0.0)),
    ));
    assert!(chart.trace(gone).is_none());
    assert_eq!(marker_owners(&chart), vec![keep]);
}

#[test]
fn render_scene_is_idempotent() {
    let mut chart = SmithChart::new();
    let id = load_on_50_ohms(&mut chart, Complex64::new(30.0, -20.0));
    chart.update_trace(
        id,
        TraceUpdate::new()
            .show_admittance(true)
            .show_wavelength_probe(true),
    );
    assert!(chart.toggle_swr_circle(id));
    assert_eq!(chart.render_scene(), chart.render_scene());
}

#[test]
fn zero_reference_trace_is_left_out() {
    let mut chart = SmithChart::new();
    let shown = chart.register_trace();
    let hidden = chart.register_trace();
    chart.update_trace(
        hidden,
        TraceUpdate::new().reference_impedance(Complex64::new(0.0, 0.0)),
    );
    assert!(chart.readout(hidden).is_none());
    assert_eq!(marker_owners(&chart), vec![shown]);
}

#[test]
fn admittance_entry_drives_the_marker() {
    let mut chart = SmithChart::new();
    let id = chart.register_trace();
    chart.update_trace(
        id,
        TraceUpdate::new().load_admittance(Complex64::new(0.01, 0.0)),
    );
    let readout = chart.readout(id).expect("finite reference");
    assert_relative_eq!(readout.z_norm.re, 2.0, epsilon = 1e-9);

    // Zero admittance hands authority back to the impedance.
    chart.update_trace(
        id,
        TraceUpdate::new()
            .load_impedance(Complex64::new(25.0, 0.0))
            .load_admittance(Complex64::new(0.0, 0.0)),
    );
    let readout = chart.readout(id).expect("finite reference");
    assert_relative_eq!(readout.z_norm.re, 0.5, epsilon = 1e-12);
}

#[test]
fn grid_color_leaves_r1_and_radial_alone() {
    let mut chart = SmithChart::new();
    let before = chart.grid().clone();
    let white = smithchart::Color::WHITE;
    chart.set_grid_color(white);
    let grid = chart.grid();
    assert_eq!(grid.resistance_color(), white);
    assert_eq!(grid.reactance_color(), white);
    assert_eq!(grid.unit_circle_color(), white);
    assert_eq!(grid.gamma_color(), white);
    assert_eq!(grid.radial_color(), before.radial_color());
    assert_eq!(grid.r1_color(), before.r1_color());
}
