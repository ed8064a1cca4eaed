//! [`ActorEntity`] implementation for [`Identity`].

use crate::identity_actor::IdentityError;
use crate::model::{parse_email, Identity, IdentityCreate, IdentityId, IdentityUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

/// Shortest password the provider accepts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[async_trait]
impl ActorEntity for Identity {
    type Id = IdentityId;
    type Create = IdentityCreate;
    type Update = IdentityUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = IdentityError;

    fn from_create_params(id: IdentityId, params: IdentityCreate) -> Result<Self, Self::Error> {
        let Some((local, domain)) = parse_email(&params.email) else {
            return Err(IdentityError::InvalidEmail(params.email));
        };
        let email = format!("{local}@{domain}");
        if params.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::WeakPassword {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        let now = Utc::now();
        Ok(Self {
            id,
            email,
            metadata: params.metadata,
            password_set_at: now,
            created_at: now,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    async fn on_update(&mut self, update: IdentityUpdate, _ctx: &()) -> Result<(), Self::Error> {
        match update {
            IdentityUpdate::MergeMetadata(metadata) => {
                self.metadata.extend(metadata);
            }
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
