//! Prompt construction and response validation for generated scenes.
//!
//! A response must be a JSON object with `backgroundColor`, `blur`, `flowSpeed`, `flowRange`
//! and exactly four `points` (`color`, `x`, `y`, `size`, `rx`, `ry`), every number inside the
//! ranges below. Anything else is rejected as a whole; nothing is partially applied.

use std::ops::RangeInclusive;

use crate::composition::model::{ColorPoint, Configuration};
use crate::foundation::color::HexColor;
use crate::foundation::error::{MeshError, MeshResult};

/// Number of points a generated scene must contain.
pub const POINT_COUNT: usize = 4;

const POSITION: RangeInclusive<f64> = 0.0..=100.0;
const SIZE: RangeInclusive<f64> = 40.0..=110.0;
const RADIUS_SCALE: RangeInclusive<f64> = 0.5..=2.5;
const BLUR: RangeInclusive<f64> = 60.0..=120.0;
const FLOW_SPEED: RangeInclusive<f64> = 1.0..=1.8;
const FLOW_RANGE: RangeInclusive<f64> = 15.0..=40.0;

/// Instruction text sent to the generator for a user prompt.
pub fn build_prompt(user_prompt: &str) -> String {
    format!(
        "Acting as a world-class UI designer, suggest a sophisticated fluid mesh gradient for: \"{prompt}\".

AESTHETIC RULES:
1. NODE COUNT: Use exactly {POINT_COUNT} color points.
2. FLUIDITY: Each point must have unique 'rx' and 'ry' values ({rs_lo} to {rs_hi}) to create elliptical flow shapes.
3. CONTRAST: Ensure points vary significantly in size (some large field washes, some sharp accent streaks).
4. COLOR HARMONY: Use professional designer palettes (Analogous, Complementary, or Split-Complementary).

Respond with a JSON object containing:
- backgroundColor (hex)
- points: array of exactly {POINT_COUNT} objects {{color (hex), x ({p_lo}-{p_hi}), y ({p_lo}-{p_hi}), size ({s_lo}-{s_hi}), rx ({rs_lo}-{rs_hi}), ry ({rs_lo}-{rs_hi})}}
- blur ({b_lo}-{b_hi})
- flowSpeed ({fs_lo}-{fs_hi})
- flowRange ({fr_lo}-{fr_hi})",
        prompt = user_prompt.trim(),
        rs_lo = RADIUS_SCALE.start(),
        rs_hi = RADIUS_SCALE.end(),
        p_lo = POSITION.start(),
        p_hi = POSITION.end(),
        s_lo = SIZE.start(),
        s_hi = SIZE.end(),
        b_lo = BLUR.start(),
        b_hi = BLUR.end(),
        fs_lo = FLOW_SPEED.start(),
        fs_hi = FLOW_SPEED.end(),
        fr_lo = FLOW_RANGE.start(),
        fr_hi = FLOW_RANGE.end(),
    )
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneResponse {
    background_color: HexColor,
    blur: f64,
    flow_speed: f64,
    flow_range: f64,
    points: Vec<PointResponse>,
}

#[derive(Debug, serde::Deserialize)]
struct PointResponse {
    color: HexColor,
    x: f64,
    y: f64,
    size: f64,
    rx: f64,
    ry: f64,
}

/// Point ids for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallIds {
    call: u64,
    salt: u32,
}

impl CallIds {
    /// Id of generated point `index`.
    pub fn point_id(&self, index: usize) -> String {
        format!("ai-{}-{index}-{:08x}", self.call, self.salt)
    }
}

/// Hands out [`CallIds`] so ids from different calls never collide.
#[derive(Debug, Clone)]
pub struct IdSource {
    calls: u64,
    salt: u32,
}

impl IdSource {
    /// Source whose ids carry `salt`, distinguishing editor sessions.
    pub fn new(salt: u32) -> Self {
        Self { calls: 0, salt }
    }

    /// Source salted from `rng`.
    pub fn from_rng(rng: &mut fastrand::Rng) -> Self {
        Self::new(rng.u32(..))
    }

    /// Ids for the next call.
    pub fn next_call(&mut self) -> CallIds {
        self.calls += 1;
        CallIds {
            call: self.calls,
            salt: self.salt,
        }
    }
}

fn check(field: &str, value: f64, range: &RangeInclusive<f64>) -> MeshResult<()> {
    if value.is_finite() && range.contains(&value) {
        return Ok(());
    }
    Err(MeshError::bridge(format!(
        "{field} = {value} is outside {}..={}",
        range.start(),
        range.end()
    )))
}

/// Strip a surrounding Markdown code fence, if the generator added one.
fn unfence(text: &str) -> &str {
    let t = text.trim();
    let Some(inner) = t.strip_prefix("```") else {
        return t;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

/// Parse and validate a raw generator response into a configuration with fresh ids.
pub fn parse_response(text: &str, ids: &CallIds) -> MeshResult<Configuration> {
    let scene: SceneResponse = serde_json::from_str(unfence(text))
        .map_err(|e| MeshError::bridge(format!("malformed response: {e}")))?;

    if scene.points.len() != POINT_COUNT {
        return Err(MeshError::bridge(format!(
            "expected exactly {POINT_COUNT} points, got {}",
            scene.points.len()
        )));
    }
    check("blur", scene.blur, &BLUR)?;
    check("flowSpeed", scene.flow_speed, &FLOW_SPEED)?;
    check("flowRange", scene.flow_range, &FLOW_RANGE)?;

    let mut points = Vec::with_capacity(POINT_COUNT);
    for (i, p) in scene.points.into_iter().enumerate() {
        check(&format!("points[{i}].x"), p.x, &POSITION)?;
        check(&format!("points[{i}].y"), p.y, &POSITION)?;
        check(&format!("points[{i}].size"), p.size, &SIZE)?;
        check(&format!("points[{i}].rx"), p.rx, &RADIUS_SCALE)?;
        check(&format!("points[{i}].ry"), p.ry, &RADIUS_SCALE)?;
        points.push(
            ColorPoint::new(ids.point_id(i), p.color, p.x, p.y, p.size).with_radii(p.rx, p.ry),
        );
    }

    let cfg = Configuration {
        background_color: scene.background_color,
        blur: scene.blur,
        flow_speed: scene.flow_speed,
        flow_range: scene.flow_range,
        points,
    };
    cfg.validate()
        .map_err(|e| MeshError::bridge(format!("generated scene rejected: {e}")))?;
    Ok(cfg)
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/schema.rs"]
mod tests;
