use super::*;

fn hex(s: &str) -> HexColor {
    HexColor::parse(s).unwrap()
}

fn basic_config() -> Configuration {
    Configuration {
        background_color: hex("#00001a"),
        blur: 31.0,
        flow_speed: 1.5,
        flow_range: 100.0,
        points: vec![
            ColorPoint::new("aa1", hex("#00ffd2"), 30.0, 20.0, 70.0).with_radii(1.8, 1.8),
            ColorPoint::new("aa2", hex("#3300ff"), 70.0, 80.0, 30.0).with_radii(1.4, 1.9),
        ],
    }
}

#[test]
fn camel_case_document_round_trips_and_defaults_radii() {
    let json = r##"{
        "backgroundColor": "#020617",
        "blur": 52,
        "flowSpeed": 1.8,
        "flowRange": 38,
        "points": [
            { "id": "nv1", "color": "#F472B6", "x": 25, "y": 25, "size": 55 }
        ]
    }"##;
    let cfg = Configuration::from_json_str(json).unwrap();
    assert_eq!(cfg.points[0].rx, 1.0);
    assert_eq!(cfg.points[0].ry, 1.0);
    assert_eq!(cfg.flow_speed, 1.8);

    let out = cfg.to_json_pretty().unwrap();
    assert!(out.contains("\"backgroundColor\""));
    assert!(out.contains("\"flowRange\""));
    assert!(out.contains("\"rx\": 1.0"));
}

#[test]
fn validate_rejects_empty_and_duplicate_points() {
    let mut cfg = basic_config();
    cfg.points.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = basic_config();
    cfg.points[1].id = "aa1".to_owned();
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("duplicate point id"));

    let mut cfg = basic_config();
    cfg.points[0].size = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn edits_are_copy_on_write() {
    let before = basic_config();
    let after = before.with_point_position("aa2", 45.2, 12.9);

    assert_eq!(before.point("aa2").unwrap().x, 70.0);
    assert_eq!(after.point("aa2").unwrap().x, 45.2);
    assert_eq!(after.point("aa2").unwrap().y, 12.9);
    assert_eq!(after.points[0], before.points[0]);

    let blurred = after.with_blur(80.0).with_flow_speed(0.5).with_flow_range(10.0);
    assert_eq!(after.blur, 31.0);
    assert_eq!(blurred.blur, 80.0);
    assert_eq!(blurred.flow_speed, 0.5);
    assert_eq!(blurred.flow_range, 10.0);
}

#[test]
fn point_edit_touches_only_given_fields() {
    let cfg = basic_config();
    let edit = PointEdit {
        color: Some(hex("#ffffff")),
        ry: Some(0.5),
        ..PointEdit::default()
    };
    let next = cfg.with_point_edit("aa1", &edit);
    let p = next.point("aa1").unwrap();
    assert_eq!(p.color.as_str(), "#ffffff");
    assert_eq!(p.ry, 0.5);
    assert_eq!(p.rx, 1.8);
    assert_eq!(p.x, 30.0);

    assert_eq!(cfg.with_point_edit("missing", &edit), cfg);
}

#[test]
fn removal_never_empties_the_point_list() {
    let cfg = basic_config();
    let one = cfg.without_point("aa1");
    assert_eq!(one.points.len(), 1);
    assert_eq!(one.points[0].id, "aa2");

    let still_one = one.without_point("aa2");
    assert_eq!(still_one, one);

    assert_eq!(cfg.without_point("nope").points.len(), 2);
}

#[test]
fn added_points_go_on_top_and_keep_order() {
    let mut rng = fastrand::Rng::with_seed(3);
    let p = ColorPoint::random(&mut rng);
    assert_eq!(p.id.len(), 9);
    assert!(p.id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert!((40.0..=60.0).contains(&p.x));
    assert!((40.0..=60.0).contains(&p.y));
    assert_eq!(p.size, 50.0);
    assert_eq!((p.rx, p.ry), (1.0, 1.0));

    let cfg = basic_config().with_point_added(p.clone());
    let ids: Vec<_> = cfg.points.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["aa1", "aa2", p.id.as_str()]);
    assert_eq!(cfg.index_of(&p.id), Some(2));
}

#[test]
fn non_finite_edits_keep_previous_values() {
    let base = Configuration::from_json_str(
        r##"{
            "backgroundColor": "#000000", "blur": 40, "flowSpeed": 1.2, "flowRange": 20,
            "points": [{ "id": "a", "color": "#ff0000", "x": 10, "y": 20, "size": 50, "rx": 1.5 }]
        }"##,
    )
    .unwrap();
    let next = base
        .with_blur(f64::NAN)
        .with_flow_speed(f64::INFINITY)
        .with_flow_range(f64::NEG_INFINITY)
        .with_point_edit(
            "a",
            &PointEdit {
                x: Some(f64::NAN),
                y: Some(35.0),
                size: Some(f64::INFINITY),
                rx: Some(f64::NAN),
                ..PointEdit::default()
            },
        );
    assert_eq!((next.blur, next.flow_speed, next.flow_range), (40.0, 1.2, 20.0));
    let p = next.point("a").unwrap();
    assert_eq!((p.x, p.y, p.size, p.rx, p.ry), (10.0, 35.0, 50.0, 1.5, 1.0));
    next.validate().unwrap();
}
