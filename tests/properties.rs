use proptest::prelude::*;
use smithchart::transform::{
    clip_to_unit_disk, reactance_arc, reciprocal, resistance_circle, swr,
};
use smithchart::{Complex64, Point, SmithChart, TraceUpdate};

fn nonzero_complex() -> impl Strategy<Value = Complex64> {
    (-1.0e3..1.0e3f64, -1.0e3..1.0e3f64)
        .prop_filter("non-zero", |(re, im)| re.hypot(*im) > 1.0e-3)
        .prop_map(|(re, im)| Complex64::new(re, im))
}

proptest! {
    #[test]
    fn resistance_circles_touch_the_rim_at_one(r in 1.0e-6..1.0e6f64) {
        let circle = resistance_circle(r).expect("non-negative resistance");
        prop_assert!(circle.center.x > 0.0 && circle.center.x < 1.0);
        prop_assert_eq!(circle.center.y, 0.0);
        let gap = circle.center.distance(Point::new(1.0, 0.0)) - circle.radius;
        prop_assert!(gap.abs() < 1.0e-12);
    }

    #[test]
    fn reactance_arcs_mirror(x in prop_oneof![-1.0e4..-1.0e-4f64, 1.0e-4..1.0e4f64]) {
        let upper = reactance_arc(x).expect("non-zero reactance");
        let lower = reactance_arc(-x).expect("non-zero reactance");
        prop_assert_eq!(upper.center.y, -lower.center.y);
        prop_assert_eq!(upper.center.x, lower.center.x);
        prop_assert_eq!(upper.radius, lower.radius);
    }

    #[test]
    fn reciprocal_round_trips(y in nonzero_complex()) {
        let back = reciprocal(reciprocal(y));
        prop_assert!((back - y).norm() <= 1.0e-12 * y.norm());
    }

    #[test]
    fn repeated_admittance_entry_is_stable(y in nonzero_complex()) {
        let mut chart = SmithChart::new();
        let id = chart.register_trace();
        chart.update_trace(id, TraceUpdate::new().load_admittance(y));
        let once = *chart.trace(id).expect("registered").load();
        chart.update_trace(id, TraceUpdate::new().load_admittance(y));
        let twice = *chart.trace(id).expect("registered").load();
        prop_assert_eq!(once, twice);
        prop_assert_eq!(twice.admittance(), y);
    }

    #[test]
    fn swr_grows_with_magnitude(a in 0.0..1.0f64, b in 0.0..1.0f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(swr(Complex64::new(low, 0.0)) <= swr(Complex64::new(high, 0.0)));
    }

    #[test]
    fn swr_is_infinite_on_and_beyond_rim(m in 1.0..10.0f64, theta in -3.1..3.1f64) {
        prop_assert!(swr(Complex64::from_polar(m.max(1.0 + 1.0e-9), theta)).is_infinite());
    }

    #[test]
    fn clipping_keeps_inside_paths(points in prop::collection::vec((-0.7..0.7f64, -0.7..0.7f64), 1..40)) {
        let path: Vec<Point> = points.into_iter().map(|(x, y)| Point::new(x, y)).collect();
        let segments = clip_to_unit_disk(&path);
        prop_assert_eq!(segments, vec![path]);
    }

    #[test]
    fn clipping_drops_outside_paths(points in prop::collection::vec((1.1..3.0f64, -3.0..3.0f64), 0..40)) {
        let path: Vec<Point> = points.into_iter().map(|(x, y)| Point::new(x, y)).collect();
        prop_assert!(clip_to_unit_disk(&path).is_empty());
    }

    #[test]
    fn clipping_splits_at_an_excursion(head in 1usize..20, out in 1usize..20, tail in 1usize..20) {
        let inside = |i: usize| Point::new(-0.5 + 0.01 * i as f64, 0.0);
        let outside = |i: usize| Point::new(1.5 + 0.01 * i as f64, 0.0);
        let mut path: Vec<Point> = (0..head).map(inside).collect();
        path.extend((0..out).map(outside));
        path.extend((0..tail).map(inside));

        let segments = clip_to_unit_disk(&path);
        prop_assert_eq!(segments.len(), 2);
        prop_assert_eq!(&segments[0][..], &path[..head]);
        prop_assert_eq!(&segments[1][..], &path[head + out..]);
    }
}

#[test]
fn swr_is_one_at_center() {
    assert_eq!(swr(Complex64::new(0.0, 0.0)), 1.0);
}
