//! [`ActorEntity`] implementations for [`Tenant`], [`Branch`] and [`ClientAccount`].

use crate::model::{
    Branch, BranchCreate, BranchId, BranchUpdate, ClaimOutcome, ClientAccount,
    ClientAccountAction, ClientAccountActionResult, ClientAccountCreate, ClientAccountUpdate,
    ClientId, ClientStatus, Tenant, TenantCreate, TenantId, TenantUpdate,
};
use crate::tenant_actor::TenantError;
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Tenant {
    type Id = TenantId;
    type Create = TenantCreate;
    type Update = TenantUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = TenantError;

    fn from_create_params(id: TenantId, params: TenantCreate) -> Result<Self, Self::Error> {
        if params.slug.trim().is_empty() {
            return Err(TenantError::ValidationError("slug must not be empty".into()));
        }
        if params.name.trim().is_empty() {
            return Err(TenantError::ValidationError("name must not be empty".into()));
        }
        Ok(Self {
            id,
            name: params.name,
            slug: params.slug,
            vertical: params.vertical,
            plan: params.plan,
            settings: params.settings,
            subscription_id: params.subscription_id,
            owner_email: params.owner_email,
            metadata: params.metadata,
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.slug.clone())
    }

    async fn on_update(&mut self, update: TenantUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(plan) = update.plan {
            self.plan = plan;
        }
        if let Some(subscription_id) = update.subscription_id {
            self.subscription_id = Some(subscription_id);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Branch {
    type Id = BranchId;
    type Create = BranchCreate;
    type Update = BranchUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = TenantError;

    fn from_create_params(id: BranchId, params: BranchCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(TenantError::ValidationError("branch name must not be empty".into()));
        }
        Ok(Self {
            id,
            tenant_id: params.tenant_id,
            name: params.name,
            is_headquarters: params.is_headquarters,
            position: params.position,
        })
    }

    /// Only the headquarters has a key: one per tenant.
    fn unique_key(&self) -> Option<String> {
        self.is_headquarters
            .then(|| format!("{}:headquarters", self.tenant_id))
    }

    async fn on_update(&mut self, update: BranchUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for ClientAccount {
    type Id = ClientId;
    type Create = ClientAccountCreate;
    type Update = ClientAccountUpdate;
    type Action = ClientAccountAction;
    type ActionResult = ClientAccountActionResult;
    type Context = ();
    type Error = TenantError;

    fn from_create_params(id: ClientId, params: ClientAccountCreate) -> Result<Self, Self::Error> {
        let contact_email = params.contact_email.trim().to_lowercase();
        if contact_email.is_empty() {
            return Err(TenantError::ValidationError("contact email must not be empty".into()));
        }
        Ok(Self {
            id,
            business_name: params.business_name,
            contact_email,
            status: ClientStatus::Pending,
            tenant_id: None,
            created_at: Utc::now(),
        })
    }

    async fn on_update(
        &mut self,
        update: ClientAccountUpdate,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.business_name {
            self.business_name = name;
        }
        if let Some(email) = update.contact_email {
            self.contact_email = email.trim().to_lowercase();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ClientAccountAction,
        _ctx: &(),
    ) -> Result<ClientAccountActionResult, Self::Error> {
        match action {
            ClientAccountAction::ClaimProvisioning { now, ttl_secs } => {
                if let Some(tenant_id) = self.tenant_id {
                    return Ok(ClientAccountActionResult::Claim(
                        ClaimOutcome::AlreadyProvisioned(tenant_id),
                    ));
                }
                if let ClientStatus::Provisioning { claimed_at } = self.status {
                    let age = now.signed_duration_since(claimed_at).num_seconds();
                    if u64::try_from(age).map_or(true, |age| age < ttl_secs) {
                        return Ok(ClientAccountActionResult::Claim(ClaimOutcome::InProgress {
                            since: claimed_at,
                        }));
                    }
                }
                self.status = ClientStatus::Provisioning { claimed_at: now };
                Ok(ClientAccountActionResult::Claim(ClaimOutcome::Claimed))
            }
            ClientAccountAction::ReleaseClaim => {
                if matches!(self.status, ClientStatus::Provisioning { .. }) {
                    self.status = ClientStatus::Pending;
                }
                Ok(ClientAccountActionResult::ReleaseClaim)
            }
            ClientAccountAction::LinkTenant(tenant_id) => {
                match self.tenant_id {
                    Some(existing) if existing != tenant_id => {
                        return Err(TenantError::AlreadyLinked {
                            client: self.id,
                            tenant: existing,
                        });
                    }
                    _ => {}
                }
                self.tenant_id = Some(tenant_id);
                self.status = ClientStatus::Active;
                Ok(ClientAccountActionResult::LinkTenant)
            }
        }
    }
}
