//! Seed content and the audit trail.

use crate::model::{AuditLogId, FaqId, ServiceId, TenantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something a tenant offers its own customers (a cleaning, a table booking).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub tenant_id: TenantId,
    pub name: String,
    pub duration_minutes: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct ServiceCreate {
    pub tenant_id: TenantId,
    pub name: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub duration_minutes: Option<u32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: FaqId,
    pub tenant_id: TenantId,
    pub question: String,
    pub answer: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct FaqCreate {
    pub tenant_id: TenantId,
    pub question: String,
    pub answer: String,
    pub category: String,
}

#[derive(Debug, Clone, Default)]
pub struct FaqUpdate {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
}

/// Append-only record of something that happened to a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: AuditLogId,
    pub tenant_id: TenantId,
    pub action: String,
    pub actor: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct AuditLogCreate {
    pub tenant_id: TenantId,
    pub action: String,
    pub actor: String,
    pub details: serde_json::Value,
}
