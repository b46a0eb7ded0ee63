use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use crate::bridge::generator::TextGenerator;
use crate::bridge::schema::{CallIds, build_prompt, parse_response};
use crate::composition::model::Configuration;
use crate::foundation::error::{MeshError, MeshResult};

/// Default time a generation may take before it is reported as failed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

/// Result of polling a [`GenerationTask`].
#[derive(Debug)]
pub enum TaskPoll {
    /// Still running.
    Pending,
    /// Finished, failed or timed out. The task must not be polled again.
    Done(MeshResult<Configuration>),
}

/// One in-flight generation running on a worker thread.
///
/// The editor polls without blocking. After a timeout the receiver is dropped, so a response
/// arriving late is discarded by the worker.
#[derive(Debug)]
pub struct GenerationTask {
    prompt: String,
    rx: Receiver<MeshResult<Configuration>>,
    started: Duration,
    timeout: Duration,
}

impl GenerationTask {
    /// Start generating a scene for `prompt` at time `now`.
    pub fn spawn(
        generator: Arc<dyn TextGenerator>,
        prompt: &str,
        ids: CallIds,
        now: Duration,
        timeout: Duration,
    ) -> MeshResult<Self> {
        let (tx, rx) = mpsc::channel();
        let instruction = build_prompt(prompt);
        std::thread::Builder::new()
            .name("meshmagic-generate".to_owned())
            .spawn(move || {
                let result = generator
                    .generate(&instruction)
                    .and_then(|raw| parse_response(&raw, &ids));
                // The editor may have timed out and dropped the receiver.
                let _ = tx.send(result);
            })
            .map_err(|e| MeshError::Other(anyhow::Error::new(e).context("spawn generator")))?;

        Ok(Self {
            prompt: prompt.to_owned(),
            rx,
            started: now,
            timeout,
        })
    }

    /// The user prompt this task was started with.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Check for completion without blocking.
    pub fn poll(&self, now: Duration) -> TaskPoll {
        match self.rx.try_recv() {
            Ok(result) => TaskPoll::Done(result),
            Err(TryRecvError::Disconnected) => {
                TaskPoll::Done(Err(MeshError::bridge("generator stopped without a response")))
            }
            Err(TryRecvError::Empty) if now.saturating_sub(self.started) >= self.timeout => {
                TaskPoll::Done(Err(self.timed_out()))
            }
            Err(TryRecvError::Empty) => TaskPoll::Pending,
        }
    }

    /// Block until the task finishes or times out.
    pub fn wait(self) -> MeshResult<Configuration> {
        match self.rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(self.timed_out()),
            Err(RecvTimeoutError::Disconnected) => {
                Err(MeshError::bridge("generator stopped without a response"))
            }
        }
    }

    fn timed_out(&self) -> MeshError {
        MeshError::bridge(format!(
            "generation timed out after {:.0}s",
            self.timeout.as_secs_f64()
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/task.rs"]
mod tests;
