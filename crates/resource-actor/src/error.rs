//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Entity hook failures are carried inside
//! [`FrameworkError::EntityError`] so clients can map them to their own error type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    /// The actor's request channel is closed (the actor task has stopped).
    #[error("Actor closed")]
    ActorClosed,
    /// The actor dropped the reply channel without answering.
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True when the actor could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }
}
