//! # Staff Actor
//!
//! Tenant-scoped people: staff records, their branch assignments and the
//! authorization role binding an identity to a tenant. Every record here is
//! written through upserts keyed by its natural key.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{StaffBranchClient, StaffClient, UserRoleClient};
use crate::model::{Staff, StaffBranch, UserRole};
use resource_actor::ResourceActor;

/// Creates a new Staff actor and its client.
pub fn new_staff(buffer_size: usize) -> (ResourceActor<Staff>, StaffClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, StaffClient::new(generic_client))
}

/// Creates a new StaffBranch actor and its client.
pub fn new_staff_branches(buffer_size: usize) -> (ResourceActor<StaffBranch>, StaffBranchClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, StaffBranchClient::new(generic_client))
}

/// Creates a new UserRole actor and its client.
pub fn new_user_roles(buffer_size: usize) -> (ResourceActor<UserRole>, UserRoleClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserRoleClient::new(generic_client))
}
