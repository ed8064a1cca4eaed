//! # Tenant Actor
//!
//! Record stores for the workspace side of provisioning: tenants, their
//! branches, and the client accounts tenants are provisioned for.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementations
//! - [`error`] - [`TenantError`], shared by the three stores
//! - [`new_tenants()`], [`new_branches()`], [`new_client_accounts()`] - factories
//!
//! ## Usage
//!
//! ```rust
//! use tenant_forge::tenant_actor;
//! use tenant_forge::model::ClientAccountCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = tenant_actor::new_client_accounts(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_account(ClientAccountCreate {
//!             business_name: "Taquería El Faro".into(),
//!             contact_email: "hola@elfaro.mx".into(),
//!         })
//!         .await?;
//!     assert_eq!(id.to_string(), "client_1");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{BranchClient, ClientAccountClient, TenantClient};
use crate::model::{Branch, ClientAccount, Tenant};
use resource_actor::ResourceActor;

/// Creates a new Tenant actor and its client.
pub fn new_tenants(buffer_size: usize) -> (ResourceActor<Tenant>, TenantClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, TenantClient::new(generic_client))
}

/// Creates a new Branch actor and its client.
pub fn new_branches(buffer_size: usize) -> (ResourceActor<Branch>, BranchClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, BranchClient::new(generic_client))
}

/// Creates a new ClientAccount actor and its client.
pub fn new_client_accounts(
    buffer_size: usize,
) -> (ResourceActor<ClientAccount>, ClientAccountClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ClientAccountClient::new(generic_client))
}
