//! Access to the identity provider and temporary credentials.

use crate::identity_actor::IdentityError;
use crate::model::{Identity, IdentityId, Metadata};
use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::{debug, instrument, warn};

/// The identity provider as provisioning sees it.
///
/// The provider offers no lookup by email, only a paginated listing, so
/// [`find_by_email`](IdentityDirectory::find_by_email) scans pages.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// One page of identities, `page` counting from 1.
    async fn list_users(&self, page: usize, per_page: usize) -> Result<Vec<Identity>, IdentityError>;

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        metadata: Metadata,
    ) -> Result<Identity, IdentityError>;

    /// Merges `metadata` into the identity's existing metadata.
    async fn update_user_metadata(
        &self,
        id: IdentityId,
        metadata: Metadata,
    ) -> Result<(), IdentityError>;

    /// Scans at most `max_pages` pages of `per_page` identities for `email`.
    ///
    /// A page shorter than `per_page` ends the directory. Reaching the page
    /// bound without seeing that end is [`IdentityError::ScanLimitExceeded`]:
    /// an unscanned tail could hold the address.
    #[instrument(skip(self))]
    async fn find_by_email(
        &self,
        email: &str,
        per_page: usize,
        max_pages: usize,
    ) -> Result<Option<Identity>, IdentityError> {
        let wanted = email.trim().to_lowercase();
        let per_page = per_page.max(1);

        for page in 1..=max_pages {
            let users = self.list_users(page, per_page).await?;
            let exhausted = users.len() < per_page;
            if let Some(found) = users.into_iter().find(|u| u.email == wanted) {
                debug!(page, user_id = %found.id, "Found existing identity");
                return Ok(Some(found));
            }
            if exhausted {
                return Ok(None);
            }
        }

        warn!(max_pages, "Identity scan reached its page limit");
        Err(IdentityError::ScanLimitExceeded { max_pages })
    }
}

/// A random alphanumeric password of `length` characters.
pub fn generate_temp_password(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}
