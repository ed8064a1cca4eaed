//! Error types for the Identity actor.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors raised by the identity provider.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IdentityError {
    #[error("Identity not found: {0}")]
    NotFound(String),

    /// An identity with this email already exists.
    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    /// The paginated email scan hit its page bound without exhausting the directory.
    #[error("Identity scan stopped after {max_pages} pages without reaching the end")]
    ScanLimitExceeded { max_pages: usize },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for IdentityError {
    fn from(msg: String) -> Self {
        IdentityError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for IdentityError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => IdentityError::NotFound(id),
            FrameworkError::Conflict(email) => IdentityError::EmailTaken(email),
            FrameworkError::EntityError(inner) => match inner.downcast::<IdentityError>() {
                Ok(err) => *err,
                Err(other) => IdentityError::ActorCommunicationError(other.to_string()),
            },
            other => IdentityError::ActorCommunicationError(other.to_string()),
        }
    }
}
