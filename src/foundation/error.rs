/// Convenience result type used across glyphfx.
pub type GlyphFxResult<T> = Result<T, GlyphFxError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlyphFxError {
    /// Invalid caller-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The host cannot provide a capability (for example shader evaluation).
    #[error("unsupported capability: {0}")]
    UnsupportedCapability(String),

    /// A bounded resource (mask cache, shader handles) is full.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Errors while rasterizing or compositing pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphFxError {
    /// Build a [`GlyphFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphFxError::UnsupportedCapability`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedCapability(msg.into())
    }

    /// Build a [`GlyphFxError::ResourceExhausted`] value.
    pub fn exhausted(msg: impl Into<String>) -> Self {
        Self::ResourceExhausted(msg.into())
    }

    /// Build a [`GlyphFxError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`GlyphFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether the demo loop may skip the current frame's effect and keep going.
    ///
    /// Every error is recoverable from the orchestrator's point of view; this only separates
    /// transient conditions from ones that will repeat on every frame.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedCapability(_) | Self::ResourceExhausted(_) | Self::Render(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
