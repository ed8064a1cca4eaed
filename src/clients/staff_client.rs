//! # Staff Clients
//!
//! Upsert-first access to staff, staff-branch links and user roles.

use crate::model::{
    Staff, StaffBranch, StaffBranchCreate, StaffBranchId, StaffCreate, StaffId, TenantId,
    UserRole, UserRoleCreate, UserRoleId,
};
use crate::staff_actor::StaffError;
use resource_actor::{ActorClient, Filter, UpsertOutcome};
use tracing::{debug, instrument};

actor_client!(
    /// Client for interacting with the Staff actor.
    Staff,
    StaffError
);

actor_client!(
    /// Client for interacting with the StaffBranch actor.
    StaffBranch,
    StaffError
);

actor_client!(
    /// Client for interacting with the UserRole actor.
    UserRole,
    StaffError
);

impl StaffClient {
    /// Inserts or refreshes the staff member keyed by (tenant, email).
    #[instrument(skip(self, params), fields(tenant = %params.tenant_id))]
    pub async fn upsert_staff(&self, params: StaffCreate) -> Result<UpsertOutcome<StaffId>, StaffError> {
        debug!("Sending request");
        self.inner.upsert(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(
        &self,
        tenant_id: TenantId,
        email: &str,
    ) -> Result<Option<Staff>, StaffError> {
        let email = email.trim().to_lowercase();
        let mut found = self
            .find(Filter::new(move |s: &Staff| {
                s.tenant_id == tenant_id && s.email == email
            }))
            .await?;
        Ok(found.pop())
    }
}

impl StaffBranchClient {
    /// Inserts or refreshes the link keyed by (staff, branch).
    #[instrument(skip(self))]
    pub async fn upsert_link(
        &self,
        params: StaffBranchCreate,
    ) -> Result<UpsertOutcome<StaffBranchId>, StaffError> {
        debug!("Sending request");
        self.inner.upsert(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_for_staff(&self, staff_id: StaffId) -> Result<Vec<StaffBranch>, StaffError> {
        self.find(Filter::new(move |l: &StaffBranch| l.staff_id == staff_id))
            .await
    }
}

impl UserRoleClient {
    /// Inserts or refreshes the role keyed by (identity, tenant).
    #[instrument(skip(self))]
    pub async fn upsert_role(
        &self,
        params: UserRoleCreate,
    ) -> Result<UpsertOutcome<UserRoleId>, StaffError> {
        debug!("Sending request");
        self.inner.upsert(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_for_tenant(&self, tenant_id: TenantId) -> Result<Vec<UserRole>, StaffError> {
        self.find(Filter::new(move |r: &UserRole| r.tenant_id == tenant_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BranchId, IdentityId};
    use resource_actor::mock::MockClient;
    use resource_actor::FrameworkError;

    #[tokio::test]
    async fn test_upsert_surfaces_outcome() {
        let mut mock = MockClient::<StaffBranch>::new();
        mock.expect_upsert().return_ok(UpsertOutcome {
            id: StaffBranchId(4),
            created: false,
        });
        let links = StaffBranchClient::new(mock.client());

        let outcome = links
            .upsert_link(StaffBranchCreate {
                staff_id: StaffId(1),
                branch_id: BranchId(1),
                is_primary: true,
            })
            .await
            .unwrap();
        assert_eq!(outcome.id, StaffBranchId(4));
        assert!(!outcome.created);
        mock.verify();
    }

    #[tokio::test]
    async fn test_conflict_maps_to_staff_error() {
        let mut mock = MockClient::<UserRole>::new();
        mock.expect_upsert()
            .return_err(FrameworkError::Conflict("user_1:tenant_1".into()));
        let roles = UserRoleClient::new(mock.client());

        let err = roles
            .upsert_role(UserRoleCreate {
                user_id: IdentityId(1),
                tenant_id: TenantId(1),
                role: "owner".into(),
                permissions: vec![],
            })
            .await
            .unwrap_err();
        assert_eq!(err, StaffError::Conflict("user_1:tenant_1".into()));
    }
}
