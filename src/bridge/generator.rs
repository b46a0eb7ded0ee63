use crate::foundation::error::{MeshError, MeshResult};

/// Text-to-text transport behind the generative bridge.
///
/// Implementations receive the full instruction text built by
/// [`crate::build_prompt`] and return the raw response body. They run on a worker thread.
pub trait TextGenerator: Send + Sync {
    /// Produce the raw response for `prompt`.
    fn generate(&self, prompt: &str) -> MeshResult<String>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> MeshResult<String> + Send + Sync,
{
    fn generate(&self, prompt: &str) -> MeshResult<String> {
        self(prompt)
    }
}

/// Always answers with the same body. Used for offline checks of stored responses.
#[derive(Debug, Clone)]
pub struct FixedResponse {
    body: String,
}

impl FixedResponse {
    /// Generator answering `body`.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl TextGenerator for FixedResponse {
    fn generate(&self, _prompt: &str) -> MeshResult<String> {
        Ok(self.body.clone())
    }
}

/// Placeholder used when no transport or credential is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl TextGenerator for Unconfigured {
    fn generate(&self, _prompt: &str) -> MeshResult<String> {
        Err(MeshError::bridge(
            "no text generator configured (missing API credential?)",
        ))
    }
}
