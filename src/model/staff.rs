//! Tenant-scoped people and their access.
//!
//! All three records are upserted by natural key during provisioning, so a
//! retried provisioning run converges on the same rows instead of duplicating
//! them:
//!
//! | Record | Unique key |
//! |---|---|
//! | [`Staff`] | tenant + lower-cased email |
//! | [`StaffBranch`] | staff + branch |
//! | [`UserRole`] | identity + tenant |

use crate::model::{BranchId, IdentityId, StaffBranchId, StaffId, TenantId, UserRoleId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub tenant_id: TenantId,
    pub user_id: IdentityId,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub position: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct StaffCreate {
    pub tenant_id: TenantId,
    pub user_id: IdentityId,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub position: String,
}

#[derive(Debug, Clone, Default)]
pub struct StaffUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// Join record between a staff member and a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffBranch {
    pub id: StaffBranchId,
    pub staff_id: StaffId,
    pub branch_id: BranchId,
    pub is_primary: bool,
}

#[derive(Debug, Clone)]
pub struct StaffBranchCreate {
    pub staff_id: StaffId,
    pub branch_id: BranchId,
    pub is_primary: bool,
}

/// Binds an identity to a tenant with a role and its permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRole {
    pub id: UserRoleId,
    pub user_id: IdentityId,
    pub tenant_id: TenantId,
    pub role: String,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct UserRoleCreate {
    pub user_id: IdentityId,
    pub tenant_id: TenantId,
    pub role: String,
    pub permissions: Vec<String>,
}

/// Role given to the person a tenant is provisioned for.
pub const OWNER_ROLE: &str = "owner";

/// Permissions of [`OWNER_ROLE`].
pub const OWNER_PERMISSIONS: [&str; 6] = [
    "tenant:manage",
    "branches:manage",
    "staff:manage",
    "services:manage",
    "content:manage",
    "billing:manage",
];
