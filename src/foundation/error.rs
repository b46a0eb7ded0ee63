/// Convenience result type used across meshmagic.
pub type MeshResult<T> = Result<T, MeshError>;

/// Top-level error taxonomy used by editor APIs.
///
/// Numeric work (flow sampling, projection, formatting) is total and never produces an error;
/// these variants only describe boundary failures.
#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The generative bridge failed: transport error, timeout, or a response that does not
    /// satisfy the configuration schema.
    #[error("bridge error: {0}")]
    Bridge(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MeshError {
    /// Build a [`MeshError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MeshError::Bridge`] value.
    pub fn bridge(msg: impl Into<String>) -> Self {
        Self::Bridge(msg.into())
    }

    /// Build a [`MeshError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
