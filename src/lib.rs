//! Meshmagic is the core of a fluid mesh gradient editor.
//!
//! A scene ([`Configuration`]) is a background color, a blur radius, flow parameters and an
//! ordered list of elliptical color sources ([`ColorPoint`]). The crate turns scenes into
//! layered radial gradients, animates them, and exports them as stylesheet or component text.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: `Configuration + t -> [FrameSample]` (drifted centers, breathing radii)
//! 2. **Project**: `[FrameSample] -> CompositeStyle` (gradient layers, blur and saturation)
//! 3. **Present**: `CompositeStyle -> Stage` (background element plus draggable handles)
//! 4. **Export** (optional): `Configuration -> String` (CSS or React)
//!
//! [`Editor`] owns one scene and routes every user action through these steps. Scene
//! replacement comes from the preset directory ([`presets`], [`random_preset`]) or from a
//! [`TextGenerator`] driven by a free-text prompt.
//!
//! Sampling and projection are total: non-finite inputs are replaced with neutral values
//! instead of failing.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animation;
mod bridge;
mod composition;
mod export;
mod foundation;
mod interaction;
mod render;
mod scenes;
mod session;

pub use animation::clock::{Clock, FlowLoop, FrameRequest, FrameTick, ManualClock, SystemClock};
pub use animation::flow::{
    FlowField, FrameSample, RADIUS_SCALE, ellipse_radius, sample_frame, sample_rest,
};
pub use bridge::generator::{FixedResponse, TextGenerator, Unconfigured};
pub use bridge::schema::{CallIds, IdSource, POINT_COUNT, build_prompt, parse_response};
pub use bridge::task::{DEFAULT_TIMEOUT, GenerationTask, TaskPoll};
pub use composition::model::{ColorPoint, Configuration, PointEdit};
pub use export::formatter::{ExportFormat, css, export, react};
pub use foundation::color::HexColor;
pub use foundation::error::{MeshError, MeshResult};
pub use interaction::drag::{Cursor, DragController, DragState, pointer_to_percent};
pub use render::projector::{
    CompositeStyle, EXPORT_SCALE, GradientLayer, PREVIEW_SCALE, SATURATE, layers,
    project_frame, project_static,
};
pub use render::stage::{BackgroundElement, HandleElement, Stage};
pub use scenes::directory::{
    Preset, display_name, find as find_preset, initial_configuration, lookup as lookup_preset,
    presets, random as random_preset,
};
pub use session::editor::{Editor, EditorOptions, GenerationStatus, Notice, TickReport};

pub use kurbo::{Point, Rect, Vec2};
