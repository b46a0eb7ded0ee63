//! Procedural flow: per-point drift and ellipse "breathing" as a pure function of time.
//!
//! For point `i` at elapsed time `t` (seconds):
//!
//! - `speed_x = flow_speed * (0.6 + 0.1 i)`, `speed_y = flow_speed * (0.5 + 0.05 i)`
//! - `drift = (sin(t speed_x + 2 i), cos(t speed_y + 1.5 i)) * flow_range`
//! - `morph = 0.2 sin(0.4 t flow_speed + i)`
//! - radii `((rx + morph) size 1.5, (ry - morph) size 1.5)`
//!
//! Drift is added to the stored base position and never written back, so stopping flow returns
//! every point exactly to its base coordinates.

use crate::composition::model::{ColorPoint, Configuration};
use crate::foundation::color::HexColor;
use crate::foundation::math::finite_or;
use kurbo::{Point, Vec2};

/// Scale from `size * rx|ry` to the ellipse radius percentage.
pub const RADIUS_SCALE: f64 = 1.5;

const MORPH_AMPLITUDE: f64 = 0.2;
const MORPH_RATE: f64 = 0.4;

/// Ellipse radius (percent) for a radius multiplier and a base size, never negative.
///
/// Static projection and flow sampling both go through this so toggling flow never makes the
/// radius jump.
pub fn ellipse_radius(scale: f64, size: f64) -> f64 {
    (scale * size * RADIUS_SCALE).max(0.0)
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Transient per-point state for a single instant.
pub struct FrameSample {
    /// Point id the sample was computed for.
    pub id: String,
    /// Point color.
    pub color: HexColor,
    /// Effective horizontal center (percent).
    pub x: f64,
    /// Effective vertical center (percent).
    pub y: f64,
    /// Effective horizontal radius (percent).
    pub rx: f64,
    /// Effective vertical radius (percent).
    pub ry: f64,
}

impl FrameSample {
    /// The non-animated sample: base position, static radii.
    pub fn at_rest(point: &ColorPoint) -> Self {
        let p = RestPoint::of(point);
        Self {
            id: point.id.clone(),
            color: point.color.clone(),
            x: p.center.x,
            y: p.center.y,
            rx: ellipse_radius(p.rx, p.size),
            ry: ellipse_radius(p.ry, p.size),
        }
    }

    /// Effective center as a point.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Point fields with non-finite values replaced by neutral defaults and `size` clamped to `>= 0`.
struct RestPoint {
    center: Point,
    size: f64,
    rx: f64,
    ry: f64,
}

impl RestPoint {
    fn of(p: &ColorPoint) -> Self {
        Self {
            center: Point::new(finite_or(p.x, 50.0), finite_or(p.y, 50.0)),
            size: finite_or(p.size, 0.0).max(0.0),
            rx: finite_or(p.rx, 1.0),
            ry: finite_or(p.ry, 1.0),
        }
    }
}

/// Global flow parameters captured from a configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowField {
    speed: f64,
    range: f64,
}

impl FlowField {
    /// Flow parameters with non-finite values treated as `0` (no motion).
    pub fn new(speed: f64, range: f64) -> Self {
        Self {
            speed: finite_or(speed, 0.0),
            range: finite_or(range, 0.0),
        }
    }

    /// Flow parameters of `cfg`.
    pub fn of(cfg: &Configuration) -> Self {
        Self::new(cfg.flow_speed, cfg.flow_range)
    }

    /// Positional displacement of point `index` at time `t`.
    pub fn drift(&self, index: usize, t: f64) -> Vec2 {
        let i = index as f64;
        let speed_x = self.speed * (0.6 + i * 0.1);
        let speed_y = self.speed * (0.5 + i * 0.05);
        Vec2::new(
            (t * speed_x + i * 2.0).sin() * self.range,
            (t * speed_y + i * 1.5).cos() * self.range,
        )
    }

    /// Radius-multiplier perturbation of point `index` at time `t`; added to `rx`, subtracted
    /// from `ry`.
    pub fn morph(&self, index: usize, t: f64) -> f64 {
        (t * self.speed * MORPH_RATE + index as f64).sin() * MORPH_AMPLITUDE
    }

    /// Sample one point at time `t`.
    pub fn sample(&self, index: usize, point: &ColorPoint, t: f64) -> FrameSample {
        let t = finite_or(t, 0.0);
        let p = RestPoint::of(point);
        let center = p.center + self.drift(index, t);
        let morph = self.morph(index, t);
        FrameSample {
            id: point.id.clone(),
            color: point.color.clone(),
            x: center.x,
            y: center.y,
            rx: ellipse_radius(p.rx + morph, p.size),
            ry: ellipse_radius(p.ry - morph, p.size),
        }
    }
}

/// Sample every point of `cfg` at elapsed time `t`, in paint order.
///
/// The point named by `held` (the one being dragged) is not animated: its sample is its at-rest
/// sample, so the position written by the drag is what gets displayed.
pub fn sample_frame(cfg: &Configuration, t: f64, held: Option<&str>) -> Vec<FrameSample> {
    let field = FlowField::of(cfg);
    cfg.points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if held == Some(p.id.as_str()) {
                FrameSample::at_rest(p)
            } else {
                field.sample(i, p, t)
            }
        })
        .collect()
}

/// At-rest samples of every point of `cfg`.
pub fn sample_rest(cfg: &Configuration) -> Vec<FrameSample> {
    cfg.points.iter().map(FrameSample::at_rest).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/flow.rs"]
mod tests;
