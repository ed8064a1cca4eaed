//! Error types for the Staff actor.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during staff, staff-branch and role operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StaffError {
    #[error("Staff record not found: {0}")]
    NotFound(String),

    #[error("Staff record already exists: {0}")]
    Conflict(String),

    #[error("Staff validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for StaffError {
    fn from(msg: String) -> Self {
        StaffError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for StaffError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => StaffError::NotFound(id),
            FrameworkError::Conflict(key) => StaffError::Conflict(key),
            FrameworkError::EntityError(inner) => match inner.downcast::<StaffError>() {
                Ok(err) => *err,
                Err(other) => StaffError::ActorCommunicationError(other.to_string()),
            },
            other => StaffError::ActorCommunicationError(other.to_string()),
        }
    }
}
