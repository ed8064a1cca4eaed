//! # Resource Actor
//!
//! In-memory record stores for the tenant forge. Every record type (tenants,
//! branches, staff, catalog components, identities, …) lives in its own
//! [`ResourceActor`], a Tokio task that owns a `BTreeMap` and processes one
//! request at a time. Callers talk to it through a cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]): the record, its DTOs and its hooks
//! 2. **Runtime Layer** ([`ResourceActor`]): message processing and the store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): typed requests
//!
//! ## What the store guarantees
//!
//! - Ids are minted from a counter starting at 1 and never reused.
//! - [`ResourceClient::query`] returns matches in id order, i.e. oldest first.
//! - A record with a [unique key](ActorEntity::unique_key) cannot be inserted
//!   twice; [`ResourceClient::upsert`] folds into the existing record instead.
//!   Both checks happen inside the actor loop, so concurrent callers cannot
//!   race past them.
//!
//! ```rust
//! use resource_actor::{ActorEntity, FrameworkError, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Tenant { id: u32, slug: String }
//! #[derive(Debug)] struct TenantCreate { slug: String }
//! #[derive(Debug, thiserror::Error)] #[error("tenant error")] struct TenantError;
//!
//! #[async_trait]
//! impl ActorEntity for Tenant {
//!     type Id = u32; type Create = TenantCreate; type Update = ();
//!     type Action = (); type ActionResult = (); type Context = (); type Error = TenantError;
//!
//!     fn from_create_params(id: u32, params: TenantCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, slug: params.slug })
//!     }
//!     fn unique_key(&self) -> Option<String> { Some(self.slug.clone()) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Tenant>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.create(TenantCreate { slug: "sonrisa".into() }).await.unwrap();
//!     let again = client.create(TenantCreate { slug: "sonrisa".into() }).await;
//!     assert!(matches!(again, Err(FrameworkError::Conflict(_))));
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies reach the hooks through `run(context)` rather than the
//! constructor, so actors that call each other can all be created first and
//! wired afterwards.
//!
//! ## Testing
//!
//! [`mock::MockClient`] returns a real `ResourceClient<T>` answered from a
//! scripted queue, which is how provisioning failures are injected in tests.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response, UpsertOutcome};
