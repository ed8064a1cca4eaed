//! # Tenant Clients
//!
//! Tenants, branches and the client accounts they are provisioned for.

use crate::model::{
    Branch, BranchCreate, BranchId, ClaimOutcome, ClientAccount, ClientAccountAction,
    ClientAccountActionResult, ClientAccountCreate, ClientId, Tenant, TenantCreate, TenantId,
};
use crate::tenant_actor::TenantError;
use chrono::{DateTime, Utc};
use resource_actor::{ActorClient, Filter};
use tracing::{debug, instrument};

actor_client!(
    /// Client for interacting with the Tenant actor.
    Tenant,
    TenantError
);

actor_client!(
    /// Client for interacting with the Branch actor.
    Branch,
    TenantError
);

actor_client!(
    /// Client for interacting with the ClientAccount actor.
    ClientAccount,
    TenantError
);

impl TenantClient {
    /// Inserts a tenant; a taken slug fails with [`TenantError::Conflict`].
    #[instrument(skip(self, params), fields(slug = %params.slug))]
    pub async fn create_tenant(&self, params: TenantCreate) -> Result<TenantId, TenantError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, TenantError> {
        let wanted = slug.to_string();
        let mut found = self
            .find(Filter::new(move |t: &Tenant| t.slug == wanted))
            .await?;
        Ok(found.pop())
    }

    pub async fn slug_taken(&self, slug: &str) -> Result<bool, TenantError> {
        Ok(self.find_by_slug(slug).await?.is_some())
    }
}

impl BranchClient {
    #[instrument(skip(self, params), fields(tenant = %params.tenant_id, hq = params.is_headquarters))]
    pub async fn create_branch(&self, params: BranchCreate) -> Result<BranchId, TenantError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Branches of a tenant, headquarters first.
    #[instrument(skip(self))]
    pub async fn list_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<Branch>, TenantError> {
        let mut branches = self
            .find(Filter::new(move |b: &Branch| b.tenant_id == tenant_id))
            .await?;
        branches.sort_by_key(|b| (!b.is_headquarters, b.position));
        Ok(branches)
    }
}

impl ClientAccountClient {
    #[instrument(skip(self))]
    pub async fn create_account(&self, params: ClientAccountCreate) -> Result<ClientId, TenantError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Atomically claims the client for one provisioning attempt.
    #[instrument(skip(self))]
    pub async fn claim(
        &self,
        id: ClientId,
        now: DateTime<Utc>,
        ttl_secs: u64,
    ) -> Result<ClaimOutcome, TenantError> {
        debug!("Claiming client for provisioning");
        match self
            .inner
            .perform_action(id, ClientAccountAction::ClaimProvisioning { now, ttl_secs })
            .await
        {
            Ok(ClientAccountActionResult::Claim(outcome)) => Ok(outcome),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn release_claim(&self, id: ClientId) -> Result<(), TenantError> {
        self.expect_result(
            id,
            ClientAccountAction::ReleaseClaim,
            ClientAccountActionResult::ReleaseClaim,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn link_tenant(&self, id: ClientId, tenant_id: TenantId) -> Result<(), TenantError> {
        self.expect_result(
            id,
            ClientAccountAction::LinkTenant(tenant_id),
            ClientAccountActionResult::LinkTenant,
        )
        .await
    }

    async fn expect_result(
        &self,
        id: ClientId,
        action: ClientAccountAction,
        expected: ClientAccountActionResult,
    ) -> Result<(), TenantError> {
        match self.inner.perform_action(id, action).await {
            Ok(result) if result == expected => Ok(()),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

fn unexpected(result: ClientAccountActionResult) -> TenantError {
    TenantError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_action};
    use resource_actor::FrameworkError;

    #[tokio::test]
    async fn test_claim_returns_outcome() {
        let (client, mut receiver) = create_mock_client::<ClientAccount>(10);
        let accounts = ClientAccountClient::new(client);
        let now = Utc::now();

        let task = tokio::spawn(async move { accounts.claim(ClientId(3), now, 900).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ClientId(3));
        assert!(matches!(
            action,
            ClientAccountAction::ClaimProvisioning { ttl_secs: 900, .. }
        ));
        responder
            .send(Ok(ClientAccountActionResult::Claim(
                ClaimOutcome::AlreadyProvisioned(TenantId(8)),
            )))
            .unwrap();

        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, ClaimOutcome::AlreadyProvisioned(TenantId(8)));
    }

    #[tokio::test]
    async fn test_entity_error_is_recovered() {
        let (client, mut receiver) = create_mock_client::<ClientAccount>(10);
        let accounts = ClientAccountClient::new(client);

        let task = tokio::spawn(async move { accounts.link_tenant(ClientId(1), TenantId(2)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        let err = TenantError::AlreadyLinked {
            client: ClientId(1),
            tenant: TenantId(9),
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(err.clone()))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), err);
    }
}
