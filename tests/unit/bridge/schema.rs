use super::*;
use serde_json::json;

fn valid_body() -> serde_json::Value {
    json!({
        "backgroundColor": "#0b1026",
        "blur": 90,
        "flowSpeed": 1.4,
        "flowRange": 30,
        "points": [
            { "color": "#ff7a59", "x": 20, "y": 30, "size": 90, "rx": 1.8, "ry": 0.9 },
            { "color": "#ffd166", "x": 75, "y": 20, "size": 60, "rx": 0.7, "ry": 2.1 },
            { "color": "#06d6a0", "x": 40, "y": 80, "size": 110, "rx": 1.3, "ry": 1.6 },
            { "color": "#118ab2", "x": 85, "y": 85, "size": 45, "rx": 2.5, "ry": 0.5 }
        ]
    })
}

fn ids() -> CallIds {
    IdSource::new(0xabcd).next_call()
}

#[test]
fn prompt_embeds_user_text_and_ranges() {
    let p = build_prompt("  Liquid Gold ");
    assert!(p.contains("\"Liquid Gold\""));
    assert!(p.contains("exactly 4 color points"));
    assert!(p.contains("blur (60-120)"));
    assert!(p.contains("flowSpeed (1-1.8)"));
    assert!(p.contains("flowRange (15-40)"));
    assert!(p.contains("size (40-110)"));
}

#[test]
fn valid_response_becomes_configuration_with_fresh_ids() {
    let cfg = parse_response(&valid_body().to_string(), &ids()).unwrap();
    assert_eq!(cfg.points.len(), 4);
    assert_eq!(cfg.background_color.as_str(), "#0b1026");
    assert_eq!(cfg.points[0].id, "ai-1-0-0000abcd");
    assert_eq!(cfg.points[3].id, "ai-1-3-0000abcd");
    assert_eq!(cfg.points[2].size, 110.0);
    assert_eq!(cfg.flow_speed, 1.4);
}

#[test]
fn ids_never_repeat_across_calls() {
    let mut source = IdSource::new(7);
    let a = parse_response(&valid_body().to_string(), &source.next_call()).unwrap();
    let b = parse_response(&valid_body().to_string(), &source.next_call()).unwrap();
    for pa in &a.points {
        assert!(b.points.iter().all(|pb| pb.id != pa.id));
    }
}

#[test]
fn fenced_response_is_accepted() {
    let text = format!("```json\n{}\n```", valid_body());
    assert!(parse_response(&text, &ids()).is_ok());
}

#[test]
fn malformed_json_is_a_bridge_error() {
    let err = parse_response("not json", &ids()).unwrap_err();
    assert!(matches!(err, MeshError::Bridge(_)));
    assert!(err.to_string().contains("malformed response"));
}

#[test]
fn wrong_point_count_is_rejected() {
    let mut body = valid_body();
    body["points"].as_array_mut().unwrap().pop();
    let err = parse_response(&body.to_string(), &ids()).unwrap_err();
    assert!(err.to_string().contains("exactly 4 points"));
}

#[test]
fn out_of_range_fields_are_rejected() {
    let cases = [
        ("/blur", json!(59)),
        ("/flowSpeed", json!(1.9)),
        ("/flowRange", json!(41)),
        ("/points/1/x", json!(-1)),
        ("/points/2/size", json!(120)),
        ("/points/3/ry", json!(0.4)),
    ];
    for (pointer, value) in cases {
        let mut body = valid_body();
        *body.pointer_mut(pointer).unwrap() = value;
        let err = parse_response(&body.to_string(), &ids()).unwrap_err();
        assert!(matches!(err, MeshError::Bridge(_)), "{pointer}");
    }
}

#[test]
fn missing_fields_and_bad_colors_are_rejected() {
    let mut body = valid_body();
    body["points"][0].as_object_mut().unwrap().remove("rx");
    assert!(parse_response(&body.to_string(), &ids()).is_err());

    let mut body = valid_body();
    body["backgroundColor"] = json!("navy");
    assert!(parse_response(&body.to_string(), &ids()).is_err());
}
