//! # Clients
//!
//! Typed wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//! Each wrapper maps store errors into its actor's error type and adds the
//! domain operations provisioning and assembly need. `get`, `find` and
//! `delete` come from [`ActorClient`](resource_actor::ActorClient).

/// Declares `<Entity>Client` with its constructor and `ActorClient` impl.
macro_rules! actor_client {
    ($(#[$meta:meta])* $entity:ident, $error:ident) => {
        paste::paste! {
            $(#[$meta])*
            #[derive(Clone)]
            pub struct [<$entity Client>] {
                inner: ::resource_actor::ResourceClient<$entity>,
            }

            impl [<$entity Client>] {
                pub fn new(inner: ::resource_actor::ResourceClient<$entity>) -> Self {
                    Self { inner }
                }
            }

            #[::async_trait::async_trait]
            impl ::resource_actor::ActorClient<$entity> for [<$entity Client>] {
                type Error = $error;

                fn inner(&self) -> &::resource_actor::ResourceClient<$entity> {
                    &self.inner
                }

                fn map_error(e: ::resource_actor::FrameworkError) -> Self::Error {
                    $error::from(e)
                }
            }
        }
    };
}

mod component_client;
mod content_client;
mod identity_client;
mod staff_client;
mod tenant_client;

pub use component_client::*;
pub use content_client::*;
pub use identity_client::*;
pub use staff_client::*;
pub use tenant_client::*;
