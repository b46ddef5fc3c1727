/// Convenience result type used across the worker core.
pub type VredResult<T> = Result<T, VredError>;

/// Top-level error taxonomy used by worker APIs.
#[derive(thiserror::Error, Debug)]
pub enum VredError {
    /// Invalid render parameters or malformed configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Path mapping rules could not be loaded or applied.
    #[error("path mapping error: {0}")]
    PathMapping(String),

    /// Invalid tile grid or image geometry.
    #[error("tiling error: {0}")]
    Tiling(String),

    /// A soft warning promoted to a failure by the warning policy.
    #[error("escalated warning: {0}")]
    Warning(String),

    /// Failures reported by the host rendering API.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VredError {
    /// Build a [`VredError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VredError::PathMapping`] value.
    pub fn path_mapping(msg: impl Into<String>) -> Self {
        Self::PathMapping(msg.into())
    }

    /// Build a [`VredError::Tiling`] value.
    pub fn tiling(msg: impl Into<String>) -> Self {
        Self::Tiling(msg.into())
    }

    /// Build a [`VredError::Warning`] value.
    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }

    /// Build a [`VredError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`VredError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
