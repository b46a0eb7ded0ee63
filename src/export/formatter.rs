use std::fmt;
use std::str::FromStr;

use crate::composition::model::Configuration;
use crate::foundation::error::MeshError;
use crate::render::projector::{CompositeStyle, EXPORT_SCALE, project_static};

/// Target of [`export`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// A `.fluid-mesh` stylesheet rule.
    Css,
    /// A self-contained React component.
    React,
}

impl FromStr for ExportFormat {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "react" | "jsx" => Ok(Self::React),
            other => Err(MeshError::validation(format!(
                "unknown export format '{other}' (expected css or react)"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Css => "css",
            Self::React => "react",
        })
    }
}

const LAYER_SEPARATOR: &str = ",\n    ";

fn export_style(cfg: &Configuration) -> CompositeStyle {
    project_static(cfg).with_display_scale(EXPORT_SCALE)
}

/// Stylesheet text for `cfg`. Layers are the preview's static layers, byte for byte.
pub fn css(cfg: &Configuration) -> String {
    let style = export_style(cfg);
    let mut out = String::new();
    out.push_str(".fluid-mesh {\n");
    out.push_str(&format!("  background-color: {};\n", style.background_color));
    // Trailing space after the colon matches what the preview copy shows.
    out.push_str("  background-image: \n");
    out.push_str(&format!("    {};\n", style.background_image(LAYER_SEPARATOR)));
    out.push_str(&format!("  filter: {};\n", style.filter()));
    out.push_str("  width: 100%;\n");
    out.push_str("  height: 100%;\n");
    out.push_str(&format!("  transform: {};\n", style.transform()));
    out.push('}');
    out
}

/// React component text for `cfg`.
pub fn react(cfg: &Configuration) -> String {
    let style = export_style(cfg);
    let image = style
        .background_image(LAYER_SEPARATOR)
        .replace('\n', "\n      ");

    let mut out = String::new();
    out.push_str("import React from 'react';\n\n");
    out.push_str("const FluidMeshGradient = () => {\n");
    out.push_str("  const style = {\n");
    out.push_str(&format!(
        "    backgroundColor: '{}',\n",
        style.background_color
    ));
    out.push_str("    backgroundImage: `\n");
    out.push_str(&format!("      {image}\n"));
    out.push_str("    `,\n");
    out.push_str(&format!("    filter: '{}',\n", style.filter()));
    out.push_str("    width: '100%',\n");
    out.push_str("    height: '100%',\n");
    out.push_str("    position: 'absolute',\n");
    out.push_str("    top: 0,\n");
    out.push_str("    left: 0,\n");
    out.push_str(&format!("    transform: '{}',\n", style.transform()));
    out.push_str("  };\n\n");
    out.push_str("  return <div style={style} />;\n");
    out.push_str("};\n\n");
    out.push_str("export default FluidMeshGradient;");
    out
}

/// Export `cfg` in `format`.
#[tracing::instrument(level = "debug", skip(cfg), fields(points = cfg.points.len()))]
pub fn export(cfg: &Configuration, format: ExportFormat) -> String {
    match format {
        ExportFormat::Css => css(cfg),
        ExportFormat::React => react(cfg),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/formatter.rs"]
mod tests;
