//! # Identity Client
//!
//! Speaks to the in-process identity provider and exposes it as an
//! [`IdentityDirectory`].

use crate::identity_actor::IdentityError;
use crate::model::{Identity, IdentityCreate, IdentityId, IdentityUpdate, Metadata};
use crate::provisioning::IdentityDirectory;
use async_trait::async_trait;
use resource_actor::{ActorClient, Filter};
use tracing::{debug, instrument};

actor_client!(
    /// Client for interacting with the Identity actor.
    Identity,
    IdentityError
);

#[async_trait]
impl IdentityDirectory for IdentityClient {
    #[instrument(skip(self))]
    async fn list_users(&self, page: usize, per_page: usize) -> Result<Vec<Identity>, IdentityError> {
        let skip = page.saturating_sub(1).saturating_mul(per_page);
        let everyone = self.find(Filter::all()).await?;
        Ok(everyone.into_iter().skip(skip).take(per_page).collect())
    }

    #[instrument(skip(self, password, metadata))]
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        metadata: Metadata,
    ) -> Result<Identity, IdentityError> {
        debug!("Sending request");
        let id = self
            .inner
            .create(IdentityCreate {
                email: email.to_string(),
                password: password.to_string(),
                metadata,
            })
            .await
            .map_err(Self::map_error)?;
        self.get(id)
            .await?
            .ok_or_else(|| IdentityError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, metadata))]
    async fn update_user_metadata(
        &self,
        id: IdentityId,
        metadata: Metadata,
    ) -> Result<(), IdentityError> {
        debug!("Sending request");
        self.inner
            .update(id, IdentityUpdate::MergeMetadata(metadata))
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity_actor;
    use serde_json::json;

    #[tokio::test]
    async fn test_pages_and_scan_against_real_actor() {
        let (actor, identities) = identity_actor::new(10);
        let handle = tokio::spawn(actor.run(()));

        for n in 0..5 {
            identities
                .create_user(&format!("user{n}@example.com"), "s3cret-pass", Metadata::new())
                .await
                .unwrap();
        }

        let second = identities.list_users(2, 2).await.unwrap();
        let emails: Vec<&str> = second.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["user2@example.com", "user3@example.com"]);
        assert!(identities.list_users(4, 2).await.unwrap().is_empty());

        let found = identities
            .find_by_email("User4@Example.com", 2, 5)
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.id), Some(IdentityId(5)));

        drop(identities);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_metadata_merge_keeps_existing_keys() {
        let (actor, identities) = identity_actor::new(10);
        let handle = tokio::spawn(actor.run(()));

        let mut initial = Metadata::new();
        initial.insert("locale".into(), json!("es-MX"));
        let user = identities
            .create_user("ana@example.com", "s3cret-pass", initial)
            .await
            .unwrap();

        let mut extra = Metadata::new();
        extra.insert("tenant_id".into(), json!(7));
        identities.update_user_metadata(user.id, extra).await.unwrap();

        let stored = identities.get(user.id).await.unwrap().unwrap();
        assert_eq!(stored.metadata.get("locale"), Some(&json!("es-MX")));
        assert_eq!(stored.metadata.get("tenant_id"), Some(&json!(7)));

        let dup = identities
            .create_user("ANA@example.com", "s3cret-pass", Metadata::new())
            .await
            .unwrap_err();
        assert_eq!(dup, IdentityError::EmailTaken("ana@example.com".into()));

        drop(identities);
        handle.await.unwrap();
    }
}
