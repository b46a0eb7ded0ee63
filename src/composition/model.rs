use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::color::HexColor;
use crate::foundation::error::{MeshError, MeshResult};

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn default_radius_scale() -> f64 {
    1.0
}

fn keep_finite(next: f64, previous: f64) -> f64 {
    if next.is_finite() { next } else { previous }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One elliptical light source.
///
/// `rx`/`ry` default to `1.0` when absent from JSON, so every in-memory point carries both.
pub struct ColorPoint {
    /// Identifier, unique within a configuration.
    pub id: String,
    /// Fill color at the ellipse center; fades to transparent at the rim.
    pub color: HexColor,
    /// Horizontal center, percent of canvas width. Values outside `0..=100` are off-canvas.
    pub x: f64,
    /// Vertical center, percent of canvas height.
    pub y: f64,
    /// Base radius magnitude.
    pub size: f64,
    /// Horizontal radius multiplier.
    #[serde(default = "default_radius_scale")]
    pub rx: f64,
    /// Vertical radius multiplier.
    #[serde(default = "default_radius_scale")]
    pub ry: f64,
}

impl ColorPoint {
    /// Circular point (`rx = ry = 1.0`).
    pub fn new(id: impl Into<String>, color: HexColor, x: f64, y: f64, size: f64) -> Self {
        Self {
            id: id.into(),
            color,
            x,
            y,
            size,
            rx: 1.0,
            ry: 1.0,
        }
    }

    /// Builder-style radius multipliers.
    pub fn with_radii(mut self, rx: f64, ry: f64) -> Self {
        self.rx = rx;
        self.ry = ry;
        self
    }

    /// A point as created by the "add node" action: fresh id, random color, near the center.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        let x = 50.0 + (rng.f64() - 0.5) * 20.0;
        let y = 50.0 + (rng.f64() - 0.5) * 20.0;
        Self::new(random_id(rng), HexColor::random(rng), x, y, 50.0)
    }

    // Non-finite numbers are dropped so the stored point stays serializable.
    fn apply(&mut self, edit: &PointEdit) {
        if let Some(color) = &edit.color {
            self.color = color.clone();
        }
        for (slot, value) in [
            (&mut self.x, edit.x),
            (&mut self.y, edit.y),
            (&mut self.size, edit.size),
            (&mut self.rx, edit.rx),
            (&mut self.ry, edit.ry),
        ] {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                *slot = v;
            }
        }
    }
}

/// Nine lowercase base-36 characters.
pub(crate) fn random_id(rng: &mut fastrand::Rng) -> String {
    (0..9)
        .map(|_| char::from(ID_ALPHABET[rng.usize(..ID_ALPHABET.len())]))
        .collect()
}

/// Partial update for a single point; `None` and non-finite fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointEdit {
    /// New color.
    pub color: Option<HexColor>,
    /// New horizontal position.
    pub x: Option<f64>,
    /// New vertical position.
    pub y: Option<f64>,
    /// New base radius magnitude.
    pub size: Option<f64>,
    /// New horizontal radius multiplier.
    pub rx: Option<f64>,
    /// New vertical radius multiplier.
    pub ry: Option<f64>,
}

impl PointEdit {
    /// Position-only edit, as produced by dragging.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A complete gradient scene.
///
/// Editing is copy-on-write: every `with_*`/`without_*` method borrows `self` and returns a new
/// value, leaving the previous configuration untouched.
pub struct Configuration {
    /// Canvas color underneath every layer.
    pub background_color: HexColor,
    /// Blur radius in pixels applied to the composited layers.
    pub blur: f64,
    /// Flow oscillation rate multiplier.
    pub flow_speed: f64,
    /// Flow displacement amplitude.
    pub flow_range: f64,
    /// Points in paint order; the first entry is the bottom-most layer.
    pub points: Vec<ColorPoint>,
}

impl Configuration {
    /// Parse a configuration from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> MeshResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MeshError::serde(format!("parse configuration JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(s: &str) -> MeshResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MeshError::validation(format!("open configuration JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty JSON in the camelCase document shape.
    pub fn to_json_pretty(&self) -> MeshResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MeshError::serde(e.to_string()))
    }

    /// Check structural invariants: non-empty point list, unique ids, finite numbers.
    pub fn validate(&self) -> MeshResult<()> {
        if self.points.is_empty() {
            return Err(MeshError::validation(
                "configuration must contain at least one point",
            ));
        }
        for (name, value) in [
            ("blur", self.blur),
            ("flowSpeed", self.flow_speed),
            ("flowRange", self.flow_range),
        ] {
            if !value.is_finite() {
                return Err(MeshError::validation(format!("{name} must be finite")));
            }
        }

        let mut seen = HashSet::with_capacity(self.points.len());
        for p in &self.points {
            if p.id.trim().is_empty() {
                return Err(MeshError::validation("point id must be non-empty"));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(MeshError::validation(format!(
                    "duplicate point id '{}'",
                    p.id
                )));
            }
            for (name, value) in [
                ("x", p.x),
                ("y", p.y),
                ("size", p.size),
                ("rx", p.rx),
                ("ry", p.ry),
            ] {
                if !value.is_finite() {
                    return Err(MeshError::validation(format!(
                        "point '{}' {name} must be finite",
                        p.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up a point by id.
    pub fn point(&self, id: &str) -> Option<&ColorPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Paint-order index of a point.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    /// Copy with a new background color.
    pub fn with_background(&self, color: HexColor) -> Self {
        Self {
            background_color: color,
            ..self.clone()
        }
    }

    /// Copy with a new blur radius. A non-finite value keeps the current one.
    pub fn with_blur(&self, blur: f64) -> Self {
        Self {
            blur: keep_finite(blur, self.blur),
            ..self.clone()
        }
    }

    /// Copy with a new flow speed. A non-finite value keeps the current one.
    pub fn with_flow_speed(&self, flow_speed: f64) -> Self {
        Self {
            flow_speed: keep_finite(flow_speed, self.flow_speed),
            ..self.clone()
        }
    }

    /// Copy with a new flow range. A non-finite value keeps the current one.
    pub fn with_flow_range(&self, flow_range: f64) -> Self {
        Self {
            flow_range: keep_finite(flow_range, self.flow_range),
            ..self.clone()
        }
    }

    /// Copy with `edit` applied to the point `id`. Unknown ids yield an unchanged copy.
    pub fn with_point_edit(&self, id: &str, edit: &PointEdit) -> Self {
        let mut next = self.clone();
        if let Some(p) = next.points.iter_mut().find(|p| p.id == id) {
            p.apply(edit);
        }
        next
    }

    /// Copy with the point `id` moved to `(x, y)`.
    pub fn with_point_position(&self, id: &str, x: f64, y: f64) -> Self {
        self.with_point_edit(id, &PointEdit::position(x, y))
    }

    /// Copy with `point` appended on top of the layer stack.
    pub fn with_point_added(&self, point: ColorPoint) -> Self {
        let mut next = self.clone();
        next.points.push(point);
        next
    }

    /// Copy without the point `id`.
    ///
    /// A configuration always keeps at least one point: removing from a single-point list, or
    /// removing an unknown id, returns an unchanged copy.
    pub fn without_point(&self, id: &str) -> Self {
        let mut next = self.clone();
        if next.points.len() > 1 {
            next.points.retain(|p| p.id != id);
        }
        next
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
