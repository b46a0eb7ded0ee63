use super::*;

fn hex(s: &str) -> HexColor {
    HexColor::parse(s).unwrap()
}

fn cfg(flow_speed: f64, flow_range: f64, points: Vec<ColorPoint>) -> Configuration {
    Configuration {
        background_color: hex("#00001a"),
        blur: 31.0,
        flow_speed,
        flow_range,
        points,
    }
}

fn grid_points(n: usize) -> Vec<ColorPoint> {
    (0..n)
        .map(|i| ColorPoint::new(format!("p{i}"), hex("#ffffff"), 50.0, 50.0, 40.0))
        .collect()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn first_point_at_time_zero_reduces_to_static_radii() {
    let c = cfg(
        1.5,
        100.0,
        vec![ColorPoint::new("aa1", hex("#00ffd2"), 30.0, 20.0, 70.0).with_radii(1.8, 1.8)],
    );
    let s = &sample_frame(&c, 0.0, None)[0];
    assert_close(s.rx, 189.0);
    assert_close(s.ry, 189.0);
    assert_close(s.x, 30.0);
    // cos(0) == 1: the y drift is at full range even at t = 0.
    assert_close(s.y, 120.0);
}

#[test]
fn zero_range_animates_radii_only() {
    let c = cfg(1.2, 0.0, grid_points(3));
    for t in [0.0, 0.7, 3.1] {
        for s in sample_frame(&c, t, None) {
            assert_close(s.x, 50.0);
            assert_close(s.y, 50.0);
        }
    }
    let a = sample_frame(&c, 0.3, None);
    let b = sample_frame(&c, 2.9, None);
    assert_ne!(a[1].rx, b[1].rx);
}

#[test]
fn zero_speed_freezes_at_phase_offsets() {
    let c = cfg(0.0, 10.0, grid_points(3));
    let a = sample_frame(&c, 1.0, None);
    let b = sample_frame(&c, 42.0, None);
    assert_eq!(a, b);

    let expected = [
        (50.0, 60.0, 60.0, 60.0),
        (
            59.092_974_268_256_82,
            50.707_372_016_677_03,
            70.097_651_817_694_75,
            49.902_348_182_305_24,
        ),
        (
            42.431_975_046_920_72,
            40.100_075_033_995_545,
            70.911_569_121_908_17,
            49.088_430_878_091_83,
        ),
    ];
    for (s, (x, y, rx, ry)) in a.iter().zip(expected) {
        assert_close(s.x, x);
        assert_close(s.y, y);
        assert_close(s.rx, rx);
        assert_close(s.ry, ry);
    }

    assert_ne!(a, sample_rest(&c));
}

#[test]
fn morph_is_anti_correlated_between_axes() {
    let c = cfg(1.0, 0.0, grid_points(4));
    for t in [0.1, 1.3, 5.8] {
        for s in sample_frame(&c, t, None) {
            // rx + ry stays at 2 * 1.0 * 40 * 1.5.
            assert_close(s.rx + s.ry, 120.0);
        }
    }
}

#[test]
fn drift_is_bounded_by_range() {
    let field = FlowField::new(1.7, 25.0);
    for i in 0..6 {
        for step in 0..200 {
            let d = field.drift(i, step as f64 * 0.05);
            assert!(d.x.abs() <= 25.0 + 1e-9);
            assert!(d.y.abs() <= 25.0 + 1e-9);
        }
    }
}

#[test]
fn sampling_never_touches_base_coordinates() {
    let c = cfg(1.5, 30.0, grid_points(2));
    let before = c.clone();
    let _ = sample_frame(&c, 12.5, None);
    assert_eq!(c, before);
}

#[test]
fn held_point_keeps_its_rest_sample() {
    let c = cfg(1.5, 30.0, grid_points(3));
    let frame = sample_frame(&c, 2.0, Some("p1"));
    assert_eq!(frame[1], FrameSample::at_rest(&c.points[1]));
    assert_ne!(frame[0], FrameSample::at_rest(&c.points[0]));
}

#[test]
fn non_finite_inputs_are_defaulted() {
    let mut points = grid_points(1);
    points[0].x = f64::NAN;
    points[0].rx = f64::INFINITY;
    let c = cfg(f64::NAN, f64::NAN, points);
    let s = &sample_frame(&c, f64::NAN, None)[0];
    assert_close(s.x, 50.0);
    assert_close(s.rx, 60.0);
    assert!(s.y.is_finite() && s.ry.is_finite());
}

#[test]
fn morph_never_pushes_a_thin_axis_negative() {
    let thin = ColorPoint::new("thin", hex("#ffffff"), 50.0, 50.0, 50.0).with_radii(0.1, 0.1);
    let c = cfg(1.5, 0.0, vec![thin]);
    // sin(4 * 1.5 * 0.4) * 0.2 exceeds 0.1, so the vertical axis would go below zero.
    let s = &sample_frame(&c, 4.0, None)[0];
    assert_eq!(s.ry, 0.0);
    assert_close(s.rx, (0.1 + 0.2 * 2.4f64.sin()) * 75.0);
    assert_eq!((s.x, s.y), (50.0, 50.0));
}

#[test]
fn negative_size_collapses_to_zero_radius() {
    let p = ColorPoint::new("neg", hex("#ffffff"), 50.0, 50.0, -50.0);
    let rest = FrameSample::at_rest(&p);
    assert_eq!((rest.rx, rest.ry), (0.0, 0.0));

    let c = cfg(1.0, 10.0, vec![p]);
    for t in [0.0, 1.3, 7.9] {
        let s = &sample_frame(&c, t, None)[0];
        assert_eq!((s.rx, s.ry), (0.0, 0.0));
    }
    assert_eq!(ellipse_radius(-1.0, 40.0), 0.0);
}
