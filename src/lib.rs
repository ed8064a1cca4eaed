//! # Tenant Forge
//!
//! Provisions multi-tenant workspaces for paying clients and assembles the
//! components each tenant needs.
//!
//! Two independent entry points:
//!
//! - **[`provisioning`]**: [`TenantProvisioner`](provisioning::TenantProvisioner)
//!   creates the tenant, its branches, owner identity, staff record and role,
//!   then seeds vertical defaults. Stores have no cross-record transactions, so
//!   every write is paired with a compensation and undone in reverse when a
//!   fatal step fails.
//! - **[`assembly`]**: selects components by plan, vertical, addons and
//!   overrides, resolves their dependencies (cycles are fatal, missing
//!   dependencies are reported), and renders a deployment plan.
//!
//! ## Module Tour
//!
//! - [`model`] - records and DTOs
//! - [`tenant_actor`], [`staff_actor`], [`identity_actor`], [`content_actor`],
//!   [`catalog_actor`] - [`ActorEntity`](resource_actor::ActorEntity)
//!   implementations, error types and factories
//! - [`clients`] - typed clients over each store
//! - [`lifecycle`] - [`TenantSystem`](lifecycle::TenantSystem) spawns and stops the stores
//! - [`config`] - environment-driven settings
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod assembly;
pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod content_actor;
pub mod identity_actor;
pub mod lifecycle;
pub mod model;
pub mod provisioning;
pub mod staff_actor;
pub mod tenant_actor;
