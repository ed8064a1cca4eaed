//! [`ActorEntity`] implementations for [`Staff`], [`StaffBranch`] and [`UserRole`].
//!
//! Each record declares a natural key and an `on_upsert` hook, so
//! [`ResourceClient::upsert`](resource_actor::ResourceClient::upsert) refreshes
//! the existing row instead of inserting a duplicate.

use crate::model::{
    Staff, StaffBranch, StaffBranchCreate, StaffBranchId, StaffCreate, StaffId, StaffUpdate,
    UserRole, UserRoleCreate, UserRoleId,
};
use crate::staff_actor::StaffError;
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Staff {
    type Id = StaffId;
    type Create = StaffCreate;
    type Update = StaffUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = StaffError;

    fn from_create_params(id: StaffId, params: StaffCreate) -> Result<Self, Self::Error> {
        let email = params.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(StaffError::ValidationError("email must not be empty".into()));
        }
        Ok(Self {
            id,
            tenant_id: params.tenant_id,
            user_id: params.user_id,
            email,
            full_name: params.full_name,
            phone: params.phone,
            position: params.position,
            is_active: true,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.tenant_id, self.email))
    }

    async fn on_update(&mut self, update: StaffUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    async fn on_upsert(&mut self, candidate: Self, _ctx: &()) -> Result<(), Self::Error> {
        self.user_id = candidate.user_id;
        self.full_name = candidate.full_name;
        if candidate.phone.is_some() {
            self.phone = candidate.phone;
        }
        self.position = candidate.position;
        self.is_active = true;
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for StaffBranch {
    type Id = StaffBranchId;
    type Create = StaffBranchCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = StaffError;

    fn from_create_params(id: StaffBranchId, params: StaffBranchCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            staff_id: params.staff_id,
            branch_id: params.branch_id,
            is_primary: params.is_primary,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.staff_id, self.branch_id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_upsert(&mut self, candidate: Self, _ctx: &()) -> Result<(), Self::Error> {
        self.is_primary = candidate.is_primary;
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for UserRole {
    type Id = UserRoleId;
    type Create = UserRoleCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = StaffError;

    fn from_create_params(id: UserRoleId, params: UserRoleCreate) -> Result<Self, Self::Error> {
        if params.role.trim().is_empty() {
            return Err(StaffError::ValidationError("role must not be empty".into()));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            tenant_id: params.tenant_id,
            role: params.role,
            permissions: params.permissions,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.user_id, self.tenant_id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_upsert(&mut self, candidate: Self, _ctx: &()) -> Result<(), Self::Error> {
        self.role = candidate.role;
        self.permissions = candidate.permissions;
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
