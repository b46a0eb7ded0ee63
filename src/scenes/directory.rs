use std::sync::OnceLock;

use crate::composition::model::{ColorPoint, Configuration};
use crate::foundation::color::HexColor;

#[derive(Clone, Debug, PartialEq)]
/// A named, immutable gallery entry.
pub struct Preset {
    /// Stored name with ordinal prefix, e.g. `01_Neon_Vortex`.
    pub name: &'static str,
    /// Embedded scene.
    pub config: Configuration,
}

impl Preset {
    /// Human-facing name (`Neon Vortex`).
    pub fn display_name(&self) -> String {
        display_name(self.name)
    }
}

/// Strip a leading `<digits>_` token, then turn the remaining underscores into spaces.
pub fn display_name(name: &str) -> String {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    let rest = match name[digits..].strip_prefix('_') {
        Some(rest) if digits > 0 => rest,
        _ => name,
    };
    rest.replace('_', " ")
}

// (id, color, x, y, size, rx, ry)
type PointDef = (&'static str, &'static str, f64, f64, f64, f64, f64);

struct PresetDef {
    name: &'static str,
    background: &'static str,
    blur: f64,
    flow_speed: f64,
    flow_range: f64,
    points: [PointDef; 4],
}

impl PresetDef {
    fn build(&self) -> Configuration {
        Configuration {
            background_color: HexColor::literal(self.background),
            blur: self.blur,
            flow_speed: self.flow_speed,
            flow_range: self.flow_range,
            points: self
                .points
                .iter()
                .map(|&(id, color, x, y, size, rx, ry)| {
                    ColorPoint::new(id, HexColor::literal(color), x, y, size).with_radii(rx, ry)
                })
                .collect(),
        }
    }
}

const INITIAL: PresetDef = PresetDef {
    name: "initial",
    background: "#00001a",
    blur: 31.0,
    flow_speed: 1.5,
    flow_range: 100.0,
    points: [
        ("aa1", "#00ffd2", 30.0, 20.0, 70.0, 1.8, 1.8),
        ("aa2", "#3300ff", 70.0, 80.0, 30.0, 1.4, 1.9),
        ("aa3", "#ffffff", 10.0, 10.0, 40.0, 1.1, 1.5),
        ("aa4", "#0066ff", 90.0, 10.0, 60.0, 0.8, 2.4),
    ],
};

const GALLERY: [PresetDef; 10] = [
    PresetDef {
        name: "01_Neon_Vortex",
        background: "#020617",
        blur: 52.0,
        flow_speed: 1.8,
        flow_range: 38.0,
        points: [
            ("nv1", "#F472B6", 25.0, 25.0, 55.0, 1.1, 1.8),
            ("nv2", "#22D3EE", 75.0, 30.0, 40.0, 0.7, 1.9),
            ("nv3", "#9333EA", 40.0, 70.0, 100.0, 1.3, 1.7),
            ("nv4", "#A5B4FC", 80.0, 75.0, 30.0, 1.5, 1.6),
        ],
    },
    PresetDef {
        name: "02_Cyber_Acid",
        background: "#001a00",
        blur: 85.0,
        flow_speed: 1.5,
        flow_range: 25.0,
        points: [
            ("ca1", "#ccff00", 10.0, 10.0, 80.0, 1.8, 0.5),
            ("ca2", "#0066ff", 90.0, 20.0, 110.0, 0.7, 2.0),
            ("ca3", "#ff00ff", 40.0, 80.0, 50.0, 1.5, 1.5),
            ("ca4", "#000000", 80.0, 90.0, 90.0, 1.0, 1.0),
        ],
    },
    PresetDef {
        name: "03_Solar_Flare",
        background: "#200000",
        blur: 65.0,
        flow_speed: 1.5,
        flow_range: 20.0,
        points: [
            ("sf1", "#ffcc00", 50.0, -10.0, 100.0, 2.5, 0.8),
            ("sf2", "#ff4400", 20.0, 60.0, 85.0, 1.0, 1.8),
            ("sf3", "#4400ff", 80.0, 90.0, 70.0, 1.5, 1.5),
            ("sf4", "#ffffff", 50.0, 40.0, 45.0, 1.0, 1.0),
        ],
    },
    PresetDef {
        name: "04_Deep_Ocean_Pulse",
        background: "#000000",
        blur: 100.0,
        flow_speed: 2.5,
        flow_range: 35.0,
        points: [
            ("do1", "#06b6d4", 20.0, 20.0, 60.0, 0.5, 2.1),
            ("do2", "#2563eb", 80.0, 20.0, 20.0, 1.5, 1.2),
            ("do3", "#9333ea", 30.0, 80.0, 40.0, 1.2, 1.8),
            ("do4", "#10b981", 70.0, 80.0, 80.0, 1.3, 1.9),
        ],
    },
    PresetDef {
        name: "05_Iridescent_Silk",
        background: "#f5f5f5",
        blur: 110.0,
        flow_speed: 1.5,
        flow_range: 40.0,
        points: [
            ("is1", "#ffafbd", 10.0, 30.0, 90.0, 2.0, 0.6),
            ("is2", "#2193b0", 90.0, 15.0, 80.0, 0.5, 1.8),
            ("is3", "#ee9ca7", 30.0, 85.0, 100.0, 1.5, 1.0),
            ("is4", "#6dd5ed", 75.0, 75.0, 60.0, 1.0, 1.5),
        ],
    },
    PresetDef {
        name: "06_Volcanic_Eruption",
        background: "#000000",
        blur: 55.0,
        flow_speed: 1.5,
        flow_range: 15.0,
        points: [
            ("ve1", "#EF4444", 35.0, 35.0, 20.0, 1.3, 1.4),
            ("ve2", "#FBBF24", 65.0, 35.0, 40.0, 0.7, 2.2),
            ("ve3", "#C4B5FD", 40.0, 65.0, 90.0, 1.4, 1.6),
            ("ve4", "#F87171", 70.0, 65.0, 40.0, 1.2, 1.5),
        ],
    },
    PresetDef {
        name: "07_Toxic_Nebula",
        background: "#0a0a20",
        blur: 80.0,
        flow_speed: 1.5,
        flow_range: 30.0,
        points: [
            ("tn1", "#00ff00", -10.0, 50.0, 80.0, 0.4, 2.5),
            ("tn2", "#ff00ff", 110.0, 50.0, 80.0, 0.4, 2.5),
            ("tn3", "#00ffff", 50.0, 10.0, 100.0, 2.0, 0.8),
            ("tn4", "#ffffff", 50.0, 90.0, 30.0, 1.0, 1.0),
        ],
    },
    PresetDef {
        name: "08_Royal_Gold",
        background: "#DD8D8D",
        blur: 10.0,
        flow_speed: 2.1,
        flow_range: 38.0,
        points: [
            ("rg1", "#FDE047", 40.0, 30.0, 40.0, 1.3, 2.1),
            ("rg2", "#991B1B", 70.0, 30.0, 40.0, 1.9, 1.5),
            ("rg3", "#6B21A8", 30.0, 70.0, 40.0, 1.1, 2.4),
            ("rg4", "#FDA4AF", 70.0, 70.0, 30.0, 1.8, 1.7),
        ],
    },
    PresetDef {
        name: "09_Arctic_Aurora",
        background: "#00001a",
        blur: 31.0,
        flow_speed: 1.5,
        flow_range: 100.0,
        points: [
            ("aa1", "#00ffd2", 30.0, 20.0, 70.0, 1.8, 1.8),
            ("aa2", "#3300ff", 70.0, 80.0, 30.0, 1.4, 1.9),
            ("aa3", "#ffffff", 10.0, 10.0, 40.0, 1.1, 1.5),
            ("aa4", "#0066ff", 90.0, 10.0, 60.0, 0.8, 2.4),
        ],
    },
    PresetDef {
        name: "10_Candy_Flow",
        background: "#fff0f5",
        blur: 85.0,
        flow_speed: 1.5,
        flow_range: 25.0,
        points: [
            ("cf1", "#ffb6c1", 20.0, 20.0, 100.0, 1.8, 1.2),
            ("cf2", "#87ceeb", 80.0, 30.0, 85.0, 1.2, 1.8),
            ("cf3", "#dda0dd", 40.0, 80.0, 70.0, 2.0, 0.7),
            ("cf4", "#ffff00", 75.0, 75.0, 45.0, 1.5, 1.5),
        ],
    },
];

/// The scene an editor opens with.
pub fn initial_configuration() -> Configuration {
    INITIAL.build()
}

/// The preset gallery, in display order.
pub fn presets() -> &'static [Preset] {
    static PRESETS: OnceLock<Vec<Preset>> = OnceLock::new();
    PRESETS.get_or_init(|| {
        GALLERY
            .iter()
            .map(|def| Preset {
                name: def.name,
                config: def.build(),
            })
            .collect()
    })
}

/// Preset by stored name (`01_Neon_Vortex`).
pub fn find(name: &str) -> Option<&'static Preset> {
    presets().iter().find(|p| p.name == name)
}

/// Preset by stored name or by display name, ignoring case (`neon vortex`).
pub fn lookup(name: &str) -> Option<&'static Preset> {
    find(name).or_else(|| {
        let wanted = name.trim();
        presets()
            .iter()
            .find(|p| p.display_name().eq_ignore_ascii_case(wanted))
    })
}

/// Uniformly chosen preset.
pub fn random(rng: &mut fastrand::Rng) -> &'static Preset {
    let all = presets();
    &all[rng.usize(..all.len())]
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/directory.rs"]
mod tests;
