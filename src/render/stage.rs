//! Retained presentation elements for the gradient canvas.
//!
//! [`Stage::mount`] is the normal, declarative path: it rebuilds every element from a
//! configuration. [`Stage::apply_frame`] is the per-frame fast path used while flow is running;
//! it only rewrites the background image and the handle positions of elements that already
//! exist, and never creates or removes anything.

use crate::animation::flow::FrameSample;
use crate::composition::model::Configuration;
use crate::foundation::color::HexColor;
use crate::foundation::math::fmt_fixed1;
use crate::render::projector::{CompositeStyle, layers, project_static};

#[derive(Clone, Debug, PartialEq)]
/// The blurred gradient surface.
pub struct BackgroundElement {
    /// `background-color` value.
    pub background_color: String,
    /// `background-image` value.
    pub background_image: String,
    /// `filter` value.
    pub filter: String,
    /// `transform` value.
    pub transform: String,
}

impl BackgroundElement {
    fn from_style(style: &CompositeStyle) -> Self {
        Self {
            background_color: style.background_color.to_string(),
            background_image: style.background_image(", "),
            filter: style.filter(),
            transform: style.transform(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Draggable marker for one point.
pub struct HandleElement {
    /// Point id.
    pub id: String,
    /// Swatch color.
    pub color: HexColor,
    /// `left` in percent.
    pub left: f64,
    /// `top` in percent.
    pub top: f64,
    /// Highlighted as the active point.
    pub active: bool,
}

impl HandleElement {
    /// `left: 30.0%; top: 20.0%;`
    pub fn position_style(&self) -> String {
        format!("left: {}%; top: {}%;", fmt_fixed1(self.left), fmt_fixed1(self.top))
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Background element plus one handle per point (when handles are shown).
pub struct Stage {
    background: BackgroundElement,
    handles: Vec<HandleElement>,
    frames_applied: u64,
}

impl Stage {
    /// Build every element from the at-rest projection of `cfg`.
    pub fn mount(cfg: &Configuration, show_handles: bool, active: Option<&str>) -> Self {
        let style = project_static(cfg);
        let handles = if show_handles {
            cfg.points
                .iter()
                .map(|p| HandleElement {
                    id: p.id.clone(),
                    color: p.color.clone(),
                    left: p.x,
                    top: p.y,
                    active: active == Some(p.id.as_str()),
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            background: BackgroundElement::from_style(&style),
            handles,
            frames_applied: 0,
        }
    }

    /// Write one flow frame into the existing elements.
    ///
    /// The handle named by `held` is left alone: the drag owns its position.
    pub fn apply_frame(&mut self, samples: &[FrameSample], held: Option<&str>) {
        self.overlay(samples, held);
        self.frames_applied += 1;
    }

    /// Rebuild every element from `cfg` like [`Stage::mount`], keeping the frame count.
    pub fn remount(&mut self, cfg: &Configuration, show_handles: bool, active: Option<&str>) {
        let frames_applied = self.frames_applied;
        *self = Self::mount(cfg, show_handles, active);
        self.frames_applied = frames_applied;
    }

    /// Write `samples` like [`Stage::apply_frame`] without counting a frame. Used to keep the
    /// current flow pose after a rebuild.
    pub fn overlay(&mut self, samples: &[FrameSample], held: Option<&str>) {
        self.background.background_image = layers(samples)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        for s in samples {
            if held == Some(s.id.as_str()) {
                continue;
            }
            if let Some(h) = self.handles.iter_mut().find(|h| h.id == s.id) {
                h.left = s.x;
                h.top = s.y;
            }
        }
    }

    /// Background element.
    pub fn background(&self) -> &BackgroundElement {
        &self.background
    }

    /// Handles in paint order.
    pub fn handles(&self) -> &[HandleElement] {
        &self.handles
    }

    /// Handle for point `id`.
    pub fn handle(&self, id: &str) -> Option<&HandleElement> {
        self.handles.iter().find(|h| h.id == id)
    }

    /// Number of flow frames written since the last [`Stage::mount`].
    pub fn frames_applied(&self) -> u64 {
        self.frames_applied
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stage.rs"]
mod tests;
