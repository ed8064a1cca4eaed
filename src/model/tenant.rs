//! Tenants and their branches.
//!
//! # Actor Framework
//! Both implement [`ActorEntity`](resource_actor::ActorEntity) in
//! [`crate::tenant_actor`]. The slug is the tenant's unique key, so two tenants
//! can never share a URL.

use crate::model::{BranchId, PlanTier, TenantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-tenant presentation defaults, sourced from the vertical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantSettings {
    pub timezone: String,
    pub locale: String,
    pub currency: String,
    pub sidebar: Vec<String>,
}

/// A provisioned workspace for one paying client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub slug: String,
    pub vertical: String,
    pub plan: PlanTier,
    pub settings: TenantSettings,
    pub subscription_id: Option<String>,
    pub owner_email: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new tenant.
#[derive(Debug, Clone)]
pub struct TenantCreate {
    pub name: String,
    pub slug: String,
    pub vertical: String,
    pub plan: PlanTier,
    pub settings: TenantSettings,
    pub subscription_id: Option<String>,
    pub owner_email: String,
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default)]
pub struct TenantUpdate {
    pub name: Option<String>,
    pub plan: Option<PlanTier>,
    pub subscription_id: Option<String>,
}

/// A physical location of a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub tenant_id: TenantId,
    pub name: String,
    pub is_headquarters: bool,
    /// 1 for the headquarters, then purchase order.
    pub position: u32,
}

#[derive(Debug, Clone)]
pub struct BranchCreate {
    pub tenant_id: TenantId,
    pub name: String,
    pub is_headquarters: bool,
    pub position: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BranchUpdate {
    pub name: Option<String>,
}
