use std::collections::BTreeMap;

use smithchart::{Complex64, GridUpdate, Layer, SmithChart, TraceUpdate};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let mut chart = SmithChart::new();
    if let Err(error) = chart.set_grid(GridUpdate::new().reactance_count(6)) {
        eprintln!("grid update rejected: {error}");
    }

    let loads = [
        Complex64::new(50.0, 0.0),
        Complex64::new(100.0, 0.0),
        Complex64::new(25.0, 40.0),
        Complex64::new(10.0, -30.0),
    ];
    for load in loads {
        let id = chart.register_trace();
        chart.update_trace(
            id,
            TraceUpdate::new()
                .load_impedance(load)
                .show_swr_circle(true)
                .show_wavelength_probe(true),
        );
    }

    for trace in chart.traces() {
        match trace.readout() {
            Some(readout) => println!("{}: {}", trace.name(), readout),
            None => println!("{}: undefined (zero reference)", trace.name()),
        }
    }

    let scene = chart.render_scene();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for primitive in scene.primitives() {
        *counts.entry(format!("{:?}", primitive.layer())).or_default() += 1;
    }
    println!("{} primitives", scene.len());
    for (layer, count) in counts {
        println!("  {layer:<18} {count}");
    }
    let skipped = scene
        .primitives()
        .iter()
        .filter(|primitive| !primitive.is_drawable())
        .count();
    println!("  skipped            {skipped}");
    println!(
        "  legend rows        {}",
        scene.layer(Layer::Legend).count()
    );
}
