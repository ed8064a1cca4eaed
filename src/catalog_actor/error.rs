//! Error types for the Catalog actor.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur while managing the component registry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Component not found: {0}")]
    NotFound(String),

    /// A component with the same name is already registered.
    #[error("Component already registered: {0}")]
    Conflict(String),

    #[error("Component validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for CatalogError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            FrameworkError::Conflict(key) => CatalogError::Conflict(key),
            FrameworkError::EntityError(inner) => match inner.downcast::<CatalogError>() {
                Ok(err) => *err,
                Err(other) => CatalogError::ActorCommunicationError(other.to_string()),
            },
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}
