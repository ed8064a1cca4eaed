//! Error types for the Content actor.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur while managing services, FAQs and audit entries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContentError {
    #[error("Content not found: {0}")]
    NotFound(String),

    #[error("Content validation error: {0}")]
    ValidationError(String),

    /// Audit entries cannot be edited.
    #[error("Audit log entries are immutable")]
    Immutable,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ContentError {
    fn from(msg: String) -> Self {
        ContentError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for ContentError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => ContentError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<ContentError>() {
                Ok(err) => *err,
                Err(other) => ContentError::ActorCommunicationError(other.to_string()),
            },
            other => ContentError::ActorCommunicationError(other.to_string()),
        }
    }
}
