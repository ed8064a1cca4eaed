//! # Store Errors
//!
//! Errors raised by the record store itself, independent of any entity type.
//! Entity-level failures are boxed into [`FrameworkError::EntityError`] so
//! callers can still downcast them.

/// Errors that can occur within the record store.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Another record already holds the same unique key.
    #[error("Unique key already taken: {0}")]
    Conflict(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True when the failure came from a unique-key collision.
    pub fn is_conflict(&self) -> bool {
        matches!(self, FrameworkError::Conflict(_))
    }
}
