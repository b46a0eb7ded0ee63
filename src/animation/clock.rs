use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary fixed epoch.
pub trait Clock {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Clock whose epoch is the moment of construction.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// Hand-driven clock for tests and offline rendering.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Clock starting at `start`.
    pub fn starting_at(start: Duration) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Jump to `to`. Going backwards is allowed; [`FlowLoop::tick`] saturates at zero elapsed.
    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Handle of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(u64);

/// One fired frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// The request that fired.
    pub request: FrameRequest,
    /// Seconds since flow was last enabled.
    pub elapsed: f64,
}

/// The recurring per-refresh flow callback.
///
/// Enabling anchors the time origin to "now": pausing and resuming restarts the motion from
/// `t = 0` instead of continuing the old phase. Disabling cancels the pending request, so no
/// frame fires after [`FlowLoop::disable`] returns.
#[derive(Debug, Default)]
pub struct FlowLoop {
    origin: Option<Duration>,
    pending: Option<FrameRequest>,
    issued: u64,
}

impl FlowLoop {
    /// A disabled loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether flow is running.
    pub fn is_enabled(&self) -> bool {
        self.origin.is_some()
    }

    /// Currently scheduled request, if any.
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Start flow at `now`. No-op when already running.
    pub fn enable(&mut self, now: Duration) {
        if self.origin.is_some() {
            return;
        }
        self.origin = Some(now);
        self.schedule();
        tracing::debug!(origin_secs = now.as_secs_f64(), "flow enabled");
    }

    /// Stop flow and cancel the pending request.
    pub fn disable(&mut self) {
        if self.origin.take().is_some() {
            tracing::debug!("flow disabled");
        }
        self.pending = None;
    }

    /// Fire the pending request, if any, and schedule the next one.
    pub fn tick(&mut self, now: Duration) -> Option<FrameTick> {
        let request = self.pending.take()?;
        let origin = self.origin?;
        self.schedule();
        Some(FrameTick {
            request,
            elapsed: now.saturating_sub(origin).as_secs_f64(),
        })
    }

    fn schedule(&mut self) {
        self.issued += 1;
        self.pending = Some(FrameRequest(self.issued));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
