//! [`ActorEntity`] implementation for [`Component`].

use crate::catalog_actor::CatalogError;
use crate::model::{Component, ComponentId, ComponentUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Component {
    type Id = ComponentId;
    /// The full definition; its `id` is replaced by the minted one.
    type Create = Component;
    type Update = ComponentUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CatalogError;

    fn from_create_params(id: ComponentId, params: Component) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(CatalogError::ValidationError("component name must not be empty".into()));
        }
        Ok(Self { id, ..params })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.clone())
    }

    async fn on_update(&mut self, update: ComponentUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(is_deprecated) = update.is_deprecated {
            self.is_deprecated = is_deprecated;
        }
        if let Some(order) = update.deployment_order {
            self.deployment_order = Some(order);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
