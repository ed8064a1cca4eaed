//! # Content Clients
//!
//! Services, FAQs and audit entries, all scoped by tenant.

use crate::content_actor::ContentError;
use crate::model::{
    AuditLog, AuditLogCreate, AuditLogId, Faq, FaqCreate, FaqId, Service, ServiceCreate,
    ServiceId, TenantId,
};
use resource_actor::{ActorClient, Filter};
use tracing::{debug, instrument};

actor_client!(
    /// Client for interacting with the Service actor.
    Service,
    ContentError
);

actor_client!(
    /// Client for interacting with the Faq actor.
    Faq,
    ContentError
);

actor_client!(
    /// Client for interacting with the AuditLog actor.
    AuditLog,
    ContentError
);

impl ServiceClient {
    #[instrument(skip(self))]
    pub async fn create_service(&self, params: ServiceCreate) -> Result<ServiceId, ContentError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn list_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Service>, ContentError> {
        self.find(Filter::new(move |s: &Service| s.tenant_id == tenant_id))
            .await
    }
}

impl FaqClient {
    #[instrument(skip(self, params), fields(tenant = %params.tenant_id))]
    pub async fn create_faq(&self, params: FaqCreate) -> Result<FaqId, ContentError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn list_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Faq>, ContentError> {
        self.find(Filter::new(move |f: &Faq| f.tenant_id == tenant_id))
            .await
    }
}

impl AuditLogClient {
    #[instrument(skip(self, params), fields(tenant = %params.tenant_id, action = %params.action))]
    pub async fn record(&self, params: AuditLogCreate) -> Result<AuditLogId, ContentError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn list_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<AuditLog>, ContentError> {
        self.find(Filter::new(move |a: &AuditLog| a.tenant_id == tenant_id))
            .await
    }
}
