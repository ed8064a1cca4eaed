//! # Component Client
//!
//! Read-mostly access to the component registry.

use crate::assembly::resolver::ComponentSource;
use crate::catalog_actor::CatalogError;
use crate::model::{Component, ComponentId};
use async_trait::async_trait;
use resource_actor::{ActorClient, Filter};
use tracing::{debug, instrument};

actor_client!(
    /// Client for interacting with the Component actor.
    Component,
    CatalogError
);

impl ComponentClient {
    /// Registers a component definition; names are unique.
    #[instrument(skip(self, component), fields(name = %component.name))]
    pub async fn register(&self, component: Component) -> Result<ComponentId, CatalogError> {
        debug!("Sending request");
        self.inner.create(component).await.map_err(Self::map_error)
    }

    /// Active, non-deprecated components ordered by deployment order.
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<Component>, CatalogError> {
        let mut active = self
            .find(Filter::new(|c: &Component| c.is_available()))
            .await?;
        active.sort_by_key(Component::sort_key);
        Ok(active)
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Component>, CatalogError> {
        let wanted = name.to_string();
        let mut found = self
            .find(Filter::new(move |c: &Component| c.name == wanted))
            .await?;
        Ok(found.pop())
    }
}

#[async_trait]
impl ComponentSource for ComponentClient {
    type Error = CatalogError;

    async fn list_active(&self) -> Result<Vec<Component>, CatalogError> {
        ComponentClient::list_active(self).await
    }

    async fn find_active(&self, name: &str) -> Result<Option<Component>, CatalogError> {
        Ok(self.find_by_name(name).await?.filter(Component::is_available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentType;
    use resource_actor::mock::MockClient;
    use resource_actor::FrameworkError;

    #[tokio::test]
    async fn test_list_active_sorts_by_deployment_order() {
        let mut mock = MockClient::<Component>::new();
        mock.expect_query().return_ok(vec![
            Component::new("reports", ComponentType::PlanFeature),
            Component::new("auth", ComponentType::Core).order(1),
            Component::new("billing", ComponentType::Core).order(200),
        ]);
        let catalog = ComponentClient::new(mock.client());

        let names: Vec<String> = catalog
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["auth", "reports", "billing"]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_active_hides_deprecated() {
        let mut mock = MockClient::<Component>::new();
        mock.expect_query()
            .return_ok(vec![Component::new("fax_gateway", ComponentType::Integration).deprecated()]);
        let catalog = ComponentClient::new(mock.client());

        assert_eq!(catalog.find_active("fax_gateway").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_conflict() {
        let mut mock = MockClient::<Component>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("auth".into()));
        let catalog = ComponentClient::new(mock.client());

        let err = catalog
            .register(Component::new("auth", ComponentType::Core))
            .await
            .unwrap_err();
        assert_eq!(err, CatalogError::Conflict("auth".into()));
    }
}
