use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use kurbo::{Point, Rect};

use crate::animation::clock::{Clock, FlowLoop};
use crate::animation::flow::sample_frame;
use crate::bridge::generator::TextGenerator;
use crate::bridge::schema::IdSource;
use crate::bridge::task::{DEFAULT_TIMEOUT, GenerationTask, TaskPoll};
use crate::composition::model::{ColorPoint, Configuration, PointEdit};
use crate::export::formatter::{ExportFormat, export};
use crate::foundation::color::HexColor;
use crate::interaction::drag::{Cursor, DragController};
use crate::render::stage::Stage;
use crate::scenes::directory::{self, display_name, initial_configuration, presets};

/// Editor start-up options.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorOptions {
    /// How long a generation may run before it is reported as failed.
    pub generation_timeout: Duration,
    /// Whether point handles are shown.
    pub show_points: bool,
    /// Whether flow starts enabled.
    pub flowing: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            generation_timeout: DEFAULT_TIMEOUT,
            show_points: true,
            flowing: false,
        }
    }
}

/// User-visible message raised by an editor operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A generation request failed or timed out. The scene was left unchanged.
    GenerationFailed(String),
}

/// What one [`Editor::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// A flow frame was written.
    pub frame: bool,
    /// State of the outstanding generation request.
    pub generation: GenerationStatus,
}

/// Outcome of [`Editor::poll_generation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    /// No request outstanding.
    Idle,
    /// Request still running.
    Pending,
    /// The generated scene replaced the current one.
    Applied,
    /// The request failed; a notice was queued.
    Failed,
}

/// The single owner of editor state: scene, drag session, flow loop and presentation.
///
/// Every UI action maps to one method. Configuration changes are copy-on-write: each edit
/// stores a new value and remounts the stage from it.
pub struct Editor {
    config: Configuration,
    drag: DragController,
    flow: FlowLoop,
    // Elapsed time of the last written flow frame; `None` until the first frame after enabling.
    pose: Option<f64>,
    stage: Stage,
    show_points: bool,
    active: Option<String>,
    prompt: String,
    task: Option<GenerationTask>,
    notices: VecDeque<Notice>,
    generator: Arc<dyn TextGenerator>,
    ids: IdSource,
    rng: fastrand::Rng,
    timeout: Duration,
    calls_issued: u64,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("config", &self.config)
            .field("drag", &self.drag)
            .field("flowing", &self.flow.is_enabled())
            .field("show_points", &self.show_points)
            .field("active", &self.active)
            .field("prompt", &self.prompt)
            .field("busy", &self.task.is_some())
            .field("notices", &self.notices)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Editor on the initial scene, using `generator` for prompt requests.
    pub fn new(generator: Arc<dyn TextGenerator>, options: EditorOptions, now: Duration) -> Self {
        Self::with_rng(generator, options, now, fastrand::Rng::new())
    }

    /// Like [`Editor::new`] with a fixed random seed, for reproducible sessions.
    pub fn seeded(
        generator: Arc<dyn TextGenerator>,
        options: EditorOptions,
        now: Duration,
        seed: u64,
    ) -> Self {
        Self::with_rng(generator, options, now, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(
        generator: Arc<dyn TextGenerator>,
        options: EditorOptions,
        now: Duration,
        mut rng: fastrand::Rng,
    ) -> Self {
        let config = initial_configuration();
        let prompt = presets()
            .first()
            .map(|p| p.display_name())
            .unwrap_or_default();
        let mut flow = FlowLoop::new();
        if options.flowing {
            flow.enable(now);
        }
        Self {
            stage: Stage::mount(&config, options.show_points, None),
            config,
            drag: DragController::new(),
            flow,
            pose: None,
            show_points: options.show_points,
            active: None,
            prompt,
            task: None,
            notices: VecDeque::new(),
            generator,
            ids: IdSource::from_rng(&mut rng),
            rng,
            timeout: options.generation_timeout,
            calls_issued: 0,
        }
    }

    /// Current scene.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Presentation elements.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Highlighted point.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Point currently held by the pointer.
    pub fn dragging(&self) -> Option<&str> {
        self.drag.dragging()
    }

    /// Cursor to show over the canvas.
    pub fn cursor(&self) -> Cursor {
        self.drag.cursor()
    }

    /// Whether pointer events must be observed outside the canvas.
    pub fn captures_global_input(&self) -> bool {
        self.drag.captures_global_input()
    }

    /// Prompt text box contents.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt text box contents.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Whether flow is running.
    pub fn is_flowing(&self) -> bool {
        self.flow.is_enabled()
    }

    /// Whether handles are shown.
    pub fn shows_points(&self) -> bool {
        self.show_points
    }

    /// Whether a generation request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    /// Number of generation requests issued so far.
    pub fn generation_calls(&self) -> u64 {
        self.calls_issued
    }

    // Rebuild the stage from the current scene. While flow is running the last frame's pose is
    // written back, so unrelated points do not snap to rest until the next frame.
    fn remount(&mut self) {
        self.stage
            .remount(&self.config, self.show_points, self.active.as_deref());
        if let Some(t) = self.pose {
            let held = self.drag.dragging();
            let samples = sample_frame(&self.config, t, held);
            self.stage.overlay(&samples, held);
        }
    }

    fn replace(&mut self, config: Configuration) {
        self.config = config;
        self.remount();
    }

    fn replace_scene(&mut self, config: Configuration, prompt: String) {
        // A held point may not exist in the new scene.
        self.drag.cancel();
        self.active = None;
        self.prompt = prompt;
        self.replace(config);
    }

    // ---- pointer ----

    /// Pointer pressed on the handle of `id`. Returns `true` when the point was captured.
    pub fn point_down(&mut self, id: &str) -> bool {
        if !self.drag.pointer_down(&self.config, id) {
            return false;
        }
        self.active = Some(id.to_owned());
        self.remount();
        true
    }

    /// Pointer moved to `pointer`, with the canvas occupying `canvas`. Returns `true` when the
    /// held point's base position changed.
    pub fn pointer_move(&mut self, canvas: Rect, pointer: Point) -> bool {
        match self.drag.pointer_move(&self.config, canvas, pointer) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => false,
        }
    }

    /// Pointer released anywhere. The point keeps its highlight.
    pub fn pointer_up(&mut self) -> Option<String> {
        self.drag.pointer_up()
    }

    /// Capture lost without a release. The last applied position stays.
    pub fn cancel_drag(&mut self) -> Option<String> {
        self.drag.cancel()
    }

    // ---- flow ----

    /// Start or stop flow. Returns the new state.
    ///
    /// Stopping restores the at-rest presentation right away.
    pub fn toggle_flow(&mut self, now: Duration) -> bool {
        if self.flow.is_enabled() {
            self.flow.disable();
            self.pose = None;
            self.stage = Stage::mount(&self.config, self.show_points, self.active.as_deref());
        } else {
            self.flow.enable(now);
        }
        self.flow.is_enabled()
    }

    /// Show or hide handles. Returns the new state.
    pub fn toggle_points(&mut self) -> bool {
        self.show_points = !self.show_points;
        self.remount();
        self.show_points
    }

    /// Run one display-refresh step. Returns `true` when a flow frame was written.
    ///
    /// Only existing elements are touched. The held point is sampled at rest and its handle
    /// is left to the drag.
    pub fn frame(&mut self, now: Duration) -> bool {
        let Some(tick) = self.flow.tick(now) else {
            return false;
        };
        let held = self.drag.dragging();
        let samples = sample_frame(&self.config, tick.elapsed, held);
        self.stage.apply_frame(&samples, held);
        self.pose = Some(tick.elapsed);
        true
    }

    /// One display refresh driven by `clock`: write a flow frame, then poll the outstanding
    /// generation request.
    pub fn tick(&mut self, clock: &dyn Clock) -> TickReport {
        let now = clock.now();
        TickReport {
            frame: self.frame(now),
            generation: self.poll_generation(now),
        }
    }

    // ---- scenes ----

    /// Load the preset named `name` (stored or display name). Returns `false` for unknown names.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn select_preset(&mut self, name: &str) -> bool {
        let Some(preset) = directory::lookup(name) else {
            tracing::debug!("no such preset");
            return false;
        };
        self.replace_scene(preset.config.clone(), preset.display_name());
        true
    }

    /// Load a uniformly chosen preset. Returns its stored name.
    pub fn randomize(&mut self) -> &'static str {
        let preset = directory::random(&mut self.rng);
        self.replace_scene(preset.config.clone(), display_name(preset.name));
        preset.name
    }

    // ---- points ----

    /// Append a randomly colored point near the center. Returns its id.
    pub fn add_point(&mut self) -> String {
        let point = ColorPoint::random(&mut self.rng);
        let id = point.id.clone();
        let next = self.config.with_point_added(point);
        self.replace(next);
        id
    }

    /// Remove the point `id`. Removing the last remaining point does nothing.
    /// Returns `true` when a point was removed.
    pub fn remove_point(&mut self, id: &str) -> bool {
        let next = self.config.without_point(id);
        if next.points.len() == self.config.points.len() {
            return false;
        }
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        if self.drag.dragging() == Some(id) {
            self.drag.cancel();
        }
        self.replace(next);
        true
    }

    /// Apply a field edit to the point `id`.
    pub fn edit_point(&mut self, id: &str, edit: &PointEdit) {
        let next = self.config.with_point_edit(id, edit);
        self.replace(next);
    }

    /// Set the background color.
    pub fn set_background(&mut self, color: HexColor) {
        let next = self.config.with_background(color);
        self.replace(next);
    }

    /// Set the blur radius in pixels.
    pub fn set_blur(&mut self, blur: f64) {
        let next = self.config.with_blur(blur);
        self.replace(next);
    }

    /// Set the flow speed multiplier.
    pub fn set_flow_speed(&mut self, flow_speed: f64) {
        let next = self.config.with_flow_speed(flow_speed);
        self.replace(next);
    }

    /// Set the drift amplitude.
    pub fn set_flow_range(&mut self, flow_range: f64) {
        let next = self.config.with_flow_range(flow_range);
        self.replace(next);
    }

    // ---- generation ----

    /// Request a scene for the current prompt.
    ///
    /// Blank prompts and requests while busy are dropped without a call. Returns `true`
    /// when a request was issued.
    #[tracing::instrument(level = "debug", skip(self), fields(prompt = self.prompt.as_str()))]
    pub fn submit_prompt(&mut self, now: Duration) -> bool {
        if self.prompt.trim().is_empty() {
            return false;
        }
        if self.task.is_some() {
            tracing::debug!("request already outstanding");
            return false;
        }
        self.active = None;
        let ids = self.ids.next_call();
        match GenerationTask::spawn(
            Arc::clone(&self.generator),
            &self.prompt,
            ids,
            now,
            self.timeout,
        ) {
            Ok(task) => {
                self.task = Some(task);
                self.calls_issued += 1;
                self.remount();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not start generation");
                self.notices
                    .push_back(Notice::GenerationFailed(e.to_string()));
                false
            }
        }
    }

    /// Check the outstanding request without blocking.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn poll_generation(&mut self, now: Duration) -> GenerationStatus {
        let Some(task) = &self.task else {
            return GenerationStatus::Idle;
        };
        let result = match task.poll(now) {
            TaskPoll::Pending => return GenerationStatus::Pending,
            TaskPoll::Done(result) => result,
        };
        let Some(task) = self.task.take() else {
            return GenerationStatus::Idle;
        };
        match result {
            Ok(config) => {
                tracing::debug!(points = config.points.len(), "generated scene applied");
                self.replace_scene(config, task.prompt().to_owned());
                GenerationStatus::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation failed");
                self.notices
                    .push_back(Notice::GenerationFailed(e.to_string()));
                GenerationStatus::Failed
            }
        }
    }

    /// Oldest pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    /// Export the current scene.
    pub fn export(&self, format: ExportFormat) -> String {
        export(&self.config, format)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
