//! Error types for the Tenant actor.

use crate::model::{ClientId, TenantId};
use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during tenant, branch and client operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TenantError {
    /// The requested record was not found.
    #[error("Tenant record not found: {0}")]
    NotFound(String),

    /// Another tenant already uses the slug (or another branch is headquarters).
    #[error("Already taken: {0}")]
    Conflict(String),

    /// The record data provided is invalid.
    #[error("Tenant validation error: {0}")]
    ValidationError(String),

    /// The client is already linked to a different tenant.
    #[error("Client {client} is already linked to {tenant}")]
    AlreadyLinked { client: ClientId, tenant: TenantId },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TenantError {
    fn from(msg: String) -> Self {
        TenantError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for TenantError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => TenantError::NotFound(id),
            FrameworkError::Conflict(key) => TenantError::Conflict(key),
            FrameworkError::EntityError(inner) => match inner.downcast::<TenantError>() {
                Ok(err) => *err,
                Err(other) => TenantError::ActorCommunicationError(other.to_string()),
            },
            other => TenantError::ActorCommunicationError(other.to_string()),
        }
    }
}
