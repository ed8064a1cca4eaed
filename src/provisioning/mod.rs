//! # Tenant Provisioning
//!
//! Bootstraps a tenant for a paying client across several independent stores
//! and undoes its own writes when a fatal step fails.
//!
//! ## Structure
//!
//! - [`validate`] - request input and its normalization
//! - [`slug`] - URL-safe slugs with bounded collision retries
//! - [`identity`] - the [`IdentityDirectory`] seam and temporary passwords
//! - [`rollback`] - [`RollbackTracker`], the saga log replayed on failure
//! - [`verticals`] - per-vertical seed data
//! - [`orchestrator`] - [`TenantProvisioner`], the step sequence itself

pub mod identity;
pub mod orchestrator;
pub mod rollback;
pub mod slug;
pub mod validate;
pub mod verticals;

pub use identity::{generate_temp_password, IdentityDirectory};
pub use orchestrator::{
    BranchSummary, ProvisionDetails, ProvisionError, ProvisionFailure, ProvisionOutcome,
    ProvisionStatus, ProvisionStep, ProvisioningStores, TenantProvisioner,
};
pub use rollback::{Compensation, Compensator, RollbackReport, RollbackTracker};
pub use validate::{ProvisionRequest, ValidatedRequest, ValidationError};
