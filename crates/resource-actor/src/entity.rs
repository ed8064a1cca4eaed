//! # ActorEntity Trait
//!
//! The contract every stored record (tenant, branch, staff member, component, …)
//! implements so a generic [`ResourceActor`](crate::ResourceActor) can own it.
//!
//! Associated types pin down the id, the creation DTO, the update DTO and the
//! custom actions of each record, so a `BranchCreate` payload can never reach the
//! staff actor.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::unique_key`]
//! - [`ActorEntity::on_upsert`]
//!
//! The defaults do nothing, so simple records only implement
//! `from_create_params`, `on_update` and `handle_action`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors. The `Context` type is
/// injected into every hook at `run()` time ("late binding"), which keeps actor
/// construction free of dependency cycles.
///
/// # Unique keys
/// A record that returns `Some(key)` from [`unique_key`](ActorEntity::unique_key)
/// takes part in natural-key enforcement: the actor refuses to create a second
/// record with the same key and resolves [`Upsert`](crate::ResourceRequest::Upsert)
/// requests against it. The check runs inside the actor loop, so it is atomic
/// with respect to every other request for that record type.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    /// Ids are minted from a `u32` counter; `Ord` keeps query results in
    /// creation order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Record-specific operations (e.g. claiming a client for provisioning).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per record type rather than one per action; clients then
    /// match a single type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the id and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Natural key of the record, if it has one.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called on the stored record when an upsert finds it by unique key.
    /// `candidate` is the record the upsert would have inserted; its id is
    /// provisional and must not be copied. The default keeps the stored record
    /// as it is.
    async fn on_upsert(&mut self, _candidate: Self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called immediately before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
