//! # Catalog Actor
//!
//! The component registry. Administrators register components out of band;
//! the assembly engine only reads them through
//! [`ComponentClient`](crate::clients::ComponentClient).

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ComponentClient;
use crate::model::Component;
use resource_actor::ResourceActor;

/// Creates a new Component actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Component>, ComponentClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ComponentClient::new(generic_client))
}
