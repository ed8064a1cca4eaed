//! # Content Actor
//!
//! Per-tenant seed content (services, FAQs) and the audit trail. Everything
//! written here during provisioning is an enrichment: failures are logged and
//! counted, never fatal.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{AuditLogClient, FaqClient, ServiceClient};
use crate::model::{AuditLog, Faq, Service};
use resource_actor::ResourceActor;

/// Creates a new Service actor and its client.
pub fn new_services(buffer_size: usize) -> (ResourceActor<Service>, ServiceClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ServiceClient::new(generic_client))
}

/// Creates a new Faq actor and its client.
pub fn new_faqs(buffer_size: usize) -> (ResourceActor<Faq>, FaqClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, FaqClient::new(generic_client))
}

/// Creates a new AuditLog actor and its client.
pub fn new_audit_logs(buffer_size: usize) -> (ResourceActor<AuditLog>, AuditLogClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, AuditLogClient::new(generic_client))
}
