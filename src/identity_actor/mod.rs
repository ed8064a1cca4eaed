//! # Identity Actor
//!
//! In-process stand-in for the external identity provider. It deliberately
//! offers no lookup by email: callers page through
//! [`IdentityDirectory::list_users`](crate::provisioning::IdentityDirectory::list_users)
//! the same way they would against the hosted provider.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::IdentityClient;
use crate::model::Identity;
use resource_actor::ResourceActor;

/// Creates a new Identity actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Identity>, IdentityClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, IdentityClient::new(generic_client))
}
