//! # ActorClient Trait
//!
//! Shared surface for record-specific clients: `get`, `find` and `delete`
//! come for free once a wrapper exposes its inner [`ResourceClient`] and says
//! how to map [`FrameworkError`] into its own error type.
use crate::{ActorEntity, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard operations.
///
/// ```rust
/// use async_trait::async_trait;
/// use resource_actor::{ActorClient, ActorEntity, Filter, FrameworkError, ResourceActor, ResourceClient};
///
/// #[derive(Clone, Debug)]
/// struct Faq { id: u32, question: String }
/// #[derive(Debug)] struct FaqCreate { question: String }
/// #[derive(Debug, thiserror::Error)]
/// #[error("faq error: {0}")]
/// struct FaqError(String);
/// impl From<String> for FaqError { fn from(s: String) -> Self { FaqError(s) } }
///
/// #[async_trait]
/// impl ActorEntity for Faq {
///     type Id = u32;
///     type Create = FaqCreate;
///     type Update = ();
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = FaqError;
///
///     fn from_create_params(id: u32, params: FaqCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, question: params.question })
///     }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct FaqClient { inner: ResourceClient<Faq> }
///
/// #[async_trait]
/// impl ActorClient<Faq> for FaqClient {
///     type Error = FaqError;
///     fn inner(&self) -> &ResourceClient<Faq> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { FaqError(e.to_string()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, inner) = ResourceActor::<Faq>::new(10);
///     tokio::spawn(actor.run(()));
///     let client = FaqClient { inner };
///
///     let id = client.inner().create(FaqCreate { question: "Parking?".into() }).await.unwrap();
///     let hits = client.find(Filter::new(|f: &Faq| f.question.contains("Parking"))).await.unwrap();
///     assert_eq!(hits.len(), 1);
///     client.delete(id).await.unwrap();
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map store errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record accepted by `filter`, oldest first.
    #[tracing::instrument(skip(self, filter))]
    async fn find(&self, filter: Filter<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().query(filter).await.map_err(Self::map_error)
    }

    /// Delete a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
