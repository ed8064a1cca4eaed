//! The paying client a tenant is provisioned for.
//!
//! A client record exists before provisioning starts (it is created when the
//! proposal is accepted). Provisioning claims it, creates the tenant and links
//! the two; the claim is what keeps two concurrent attempts for the same client
//! from both creating a tenant.

use crate::model::{ClientId, TenantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ClientStatus {
    Pending,
    /// An attempt is in flight since `claimed_at`.
    Provisioning { claimed_at: DateTime<Utc> },
    Active,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientAccount {
    pub id: ClientId,
    pub business_name: String,
    pub contact_email: String,
    pub status: ClientStatus,
    pub tenant_id: Option<TenantId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ClientAccountCreate {
    pub business_name: String,
    pub contact_email: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClientAccountUpdate {
    pub business_name: Option<String>,
    pub contact_email: Option<String>,
}

/// Provisioning transitions of a client record.
#[derive(Debug, Clone)]
pub enum ClientAccountAction {
    /// Take the client for one provisioning attempt. A claim older than
    /// `ttl_secs` is treated as abandoned and taken over.
    ClaimProvisioning { now: DateTime<Utc>, ttl_secs: u64 },
    /// Give a claim back after a failed attempt.
    ReleaseClaim,
    /// Attach the tenant and mark the client active.
    LinkTenant(TenantId),
}

/// Results from ClientAccountActions, one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientAccountActionResult {
    Claim(ClaimOutcome),
    ReleaseClaim,
    LinkTenant,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    Claimed,
    /// The client already has a tenant; nothing to do.
    AlreadyProvisioned(TenantId),
    /// Another attempt holds a live claim.
    InProgress { since: DateTime<Utc> },
}
