use super::*;
use crate::render::projector::project_static;
use crate::scenes::directory::initial_configuration;

const INITIAL_CSS: &str = "\
.fluid-mesh {
  background-color: #00001a;
  background-image: 
    radial-gradient(ellipse 189% 189% at 30.0% 20.0%, #00ffd2, transparent),
    radial-gradient(ellipse 63% 85.5% at 70.0% 80.0%, #3300ff, transparent),
    radial-gradient(ellipse 66% 90% at 10.0% 10.0%, #ffffff, transparent),
    radial-gradient(ellipse 72% 216% at 90.0% 10.0%, #0066ff, transparent);
  filter: blur(31px) saturate(1.4);
  width: 100%;
  height: 100%;
  transform: scale(1.2);
}";

#[test]
fn css_of_initial_scene() {
    assert_eq!(css(&initial_configuration()), INITIAL_CSS);
}

#[test]
fn react_embeds_the_same_layers_with_deeper_indent() {
    let out = react(&initial_configuration());
    assert!(out.starts_with("import React from 'react';\n\nconst FluidMeshGradient = () => {"));
    assert!(out.contains("    backgroundColor: '#00001a',\n"));
    assert!(out.contains(
        "      radial-gradient(ellipse 189% 189% at 30.0% 20.0%, #00ffd2, transparent),\n      radial-gradient(ellipse 63% 85.5%"
    ));
    assert!(out.contains("    filter: 'blur(31px) saturate(1.4)',\n"));
    assert!(out.contains("    position: 'absolute',\n"));
    assert!(out.contains("    transform: 'scale(1.2)',\n"));
    assert!(out.ends_with("export default FluidMeshGradient;"));
}

#[test]
fn layers_match_preview_byte_for_byte() {
    let cfg = initial_configuration();
    let preview = project_static(&cfg);
    let out = css(&cfg);
    for layer in &preview.layers {
        assert!(out.contains(&layer.to_string()), "missing {layer}");
    }
    // Only the display scale differs from the preview.
    assert_eq!(preview.transform(), "scale(1.25)");
}

#[test]
fn export_dispatches_on_format() {
    let cfg = initial_configuration();
    assert_eq!(export(&cfg, ExportFormat::Css), css(&cfg));
    assert_eq!(export(&cfg, ExportFormat::React), react(&cfg));
}

#[test]
fn format_parsing() {
    assert_eq!("CSS".parse::<ExportFormat>().unwrap(), ExportFormat::Css);
    assert_eq!(" react ".parse::<ExportFormat>().unwrap(), ExportFormat::React);
    assert_eq!("jsx".parse::<ExportFormat>().unwrap(), ExportFormat::React);
    assert!("svg".parse::<ExportFormat>().is_err());
    assert_eq!(ExportFormat::React.to_string(), "react");
}

#[test]
fn short_hex_colors_pass_through_unchanged() {
    let cfg = Configuration::from_json_str(
        r##"{
            "backgroundColor": "#000", "blur": 40, "flowSpeed": 1, "flowRange": 10,
            "points": [{ "id": "p", "color": "#Fa0", "x": 50, "y": 50, "size": 40 }]
        }"##,
    )
    .unwrap();
    let out = css(&cfg);
    assert!(out.contains("  background-color: #000;\n"));
    assert!(out.contains("at 50.0% 50.0%, #Fa0, transparent);"));
}
