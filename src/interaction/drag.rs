use kurbo::{Point, Rect};

use crate::composition::model::Configuration;

/// Pointer affordance shown while the controller is in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Platform default.
    Default,
    /// Closed hand; shown everywhere while a point is captured.
    Grabbing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Drag session state.
pub enum DragState {
    /// No point captured.
    #[default]
    Idle,
    /// Point `id` is captured and follows the pointer.
    Dragging {
        /// Captured point id.
        id: String,
    },
}

/// Map a pointer position to canvas percentages.
///
/// The result is not range-limited: a pointer outside `canvas` yields values below 0 or above
/// 100, which places the point off-canvas. Returns `None` for a degenerate canvas.
pub fn pointer_to_percent(canvas: Rect, pointer: Point) -> Option<Point> {
    let (w, h) = (canvas.width(), canvas.height());
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return None;
    }
    if !(pointer.x.is_finite() && pointer.y.is_finite()) {
        return None;
    }
    Some(Point::new(
        (pointer.x - canvas.x0) / w * 100.0,
        (pointer.y - canvas.y0) / h * 100.0,
    ))
}

/// Two-state pointer capture for point dragging.
///
/// Only one point can be captured. A pointer-down on another point while dragging is ignored;
/// the first capture stays in place until pointer-up.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Captured point id, if any.
    pub fn dragging(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { id } => Some(id),
        }
    }

    /// Pointer pressed on the handle of point `id`. Returns `true` when the point was captured.
    pub fn pointer_down(&mut self, cfg: &Configuration, id: &str) -> bool {
        if let Some(current) = self.dragging() {
            tracing::debug!(current, ignored = id, "pointer-down ignored while dragging");
            return false;
        }
        if cfg.point(id).is_none() {
            return false;
        }
        self.state = DragState::Dragging { id: id.to_owned() };
        tracing::debug!(id, "drag started");
        true
    }

    /// Pointer moved anywhere. While dragging, returns `cfg` with the captured point's base
    /// position set under the pointer.
    pub fn pointer_move(
        &self,
        cfg: &Configuration,
        canvas: Rect,
        pointer: Point,
    ) -> Option<Configuration> {
        let id = self.dragging()?;
        let at = pointer_to_percent(canvas, pointer)?;
        Some(cfg.with_point_position(id, at.x, at.y))
    }

    /// Pointer released anywhere. Returns the released id.
    pub fn pointer_up(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { id } => {
                tracing::debug!(id = id.as_str(), "drag released");
                Some(id)
            }
        }
    }

    /// Capture lost without a pointer-up (focus loss). The last applied position stays.
    pub fn cancel(&mut self) -> Option<String> {
        self.pointer_up()
    }

    /// Cursor to show.
    pub fn cursor(&self) -> Cursor {
        match self.state {
            DragState::Idle => Cursor::Default,
            DragState::Dragging { .. } => Cursor::Grabbing,
        }
    }

    /// Whether pointer events must be observed outside the canvas.
    pub fn captures_global_input(&self) -> bool {
        self.dragging().is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/drag.rs"]
mod tests;
