use std::fmt;

use crate::animation::flow::{FrameSample, sample_rest};
use crate::composition::model::Configuration;
use crate::foundation::color::HexColor;
use crate::foundation::math::{finite_or, fmt_fixed1, fmt_trimmed};

/// Display scale used by the live preview.
pub const PREVIEW_SCALE: f64 = 1.25;
/// Display scale written into exported code.
pub const EXPORT_SCALE: f64 = 1.2;
/// Saturation boost applied on top of the blur.
pub const SATURATE: f64 = 1.4;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One elliptical color-to-transparent fade.
pub struct GradientLayer {
    /// Horizontal radius, percent.
    pub radius_x: f64,
    /// Vertical radius, percent.
    pub radius_y: f64,
    /// Horizontal center, percent.
    pub center_x: f64,
    /// Vertical center, percent.
    pub center_y: f64,
    /// Center color.
    pub color: HexColor,
}

impl GradientLayer {
    /// Layer for one sample.
    pub fn from_sample(s: &FrameSample) -> Self {
        Self {
            radius_x: s.rx,
            radius_y: s.ry,
            center_x: s.x,
            center_y: s.y,
            color: s.color.clone(),
        }
    }
}

// radial-gradient(ellipse 189% 189% at 30.0% 20.0%, #00ffd2, transparent)
// Centers always carry one decimal place; radii at most two, trailing zeros trimmed.
impl fmt::Display for GradientLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "radial-gradient(ellipse {}% {}% at {}% {}%, {}, transparent)",
            fmt_trimmed(self.radius_x),
            fmt_trimmed(self.radius_y),
            fmt_fixed1(self.center_x),
            fmt_fixed1(self.center_y),
            self.color
        )
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything needed to paint the gradient surface.
pub struct CompositeStyle {
    /// Solid color under the layers.
    pub background_color: HexColor,
    /// Layers in paint order; index `i` belongs to point `i`.
    pub layers: Vec<GradientLayer>,
    /// Blur radius in pixels.
    pub blur_px: f64,
    /// Saturation multiplier.
    pub saturate: f64,
    /// Uniform scale keeping blurred edges off the viewport boundary. Cosmetic only.
    pub display_scale: f64,
}

impl CompositeStyle {
    /// Layers joined with `separator` (`", "` for inline styles).
    pub fn background_image(&self, separator: &str) -> String {
        self.layers
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// `blur(31px) saturate(1.4)`
    pub fn filter(&self) -> String {
        format!(
            "blur({}px) saturate({})",
            fmt_trimmed(self.blur_px),
            fmt_trimmed(self.saturate)
        )
    }

    /// `scale(1.25)`
    pub fn transform(&self) -> String {
        format!("scale({})", fmt_trimmed(self.display_scale))
    }

    /// Same style with another display scale.
    pub fn with_display_scale(mut self, scale: f64) -> Self {
        self.display_scale = scale;
        self
    }

    /// Inline declaration block (`background-color: ...; background-image: ...; ...`).
    pub fn to_inline(&self) -> String {
        format!(
            "background-color: {}; background-image: {}; filter: {}; transform: {};",
            self.background_color,
            self.background_image(", "),
            self.filter(),
            self.transform()
        )
    }
}

/// Layers for a set of samples, order preserved.
pub fn layers(samples: &[FrameSample]) -> Vec<GradientLayer> {
    samples.iter().map(GradientLayer::from_sample).collect()
}

/// Style of `cfg` with every point at rest.
pub fn project_static(cfg: &Configuration) -> CompositeStyle {
    project_frame(cfg, &sample_rest(cfg))
}

/// Style of `cfg` using per-frame samples instead of the stored positions.
pub fn project_frame(cfg: &Configuration, samples: &[FrameSample]) -> CompositeStyle {
    CompositeStyle {
        background_color: cfg.background_color.clone(),
        layers: layers(samples),
        blur_px: finite_or(cfg.blur, 0.0).max(0.0),
        saturate: SATURATE,
        display_scale: PREVIEW_SCALE,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/projector.rs"]
mod tests;
