//! # Generic Actor Server
//!
//! `ResourceActor` owns the records of one type and processes requests
//! sequentially, so it needs no locks and every request (including the unique
//! key check of a create or upsert) observes a consistent store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, UpsertOutcome};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// The actor is the "server" half: it owns the store and the receiving end of
/// the channel. Each instance runs in its own Tokio task and handles one
/// message at a time.
///
/// ```rust
/// use async_trait::async_trait;
/// use resource_actor::{ActorEntity, ResourceActor};
///
/// #[derive(Clone, Debug)]
/// struct Branch { id: u32, name: String }
/// #[derive(Debug)] struct BranchCreate { name: String }
/// #[derive(Debug, thiserror::Error)] #[error("branch error")] struct BranchError;
///
/// #[async_trait]
/// impl ActorEntity for Branch {
///     type Id = u32;
///     type Create = BranchCreate;
///     type Update = ();
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = BranchError;
///
///     fn from_create_params(id: u32, params: BranchCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, name: params.name })
///     }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Branch>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(BranchCreate { name: "Centro".into() }).await.unwrap();
///     assert_eq!(client.get(id).await.unwrap().unwrap().name, "Centro");
/// }
/// ```
///
/// # Operations
///
/// * **Create**: mints the next id, builds the record, rejects a unique-key
///   collision with [`FrameworkError::Conflict`], runs `on_create`, stores it.
/// * **Get / Query**: clones matching records; queries return id order.
/// * **Update**: runs `on_update` on the stored record and returns the new state.
/// * **Upsert**: builds a candidate; if a record with the same unique key exists,
///   runs `on_upsert` on it, otherwise inserts the candidate. Ids are only
///   consumed on insert.
/// * **Delete**: runs `on_delete` then removes the record.
/// * **Action**: runs `handle_action` on the stored record.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the channel; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn find_by_key(&self, key: &str) -> Option<T::Id> {
        self.store
            .iter()
            .find(|(_, item)| item.unique_key().as_deref() == Some(key))
            .map(|(id, _)| id.clone())
    }

    /// Runs the actor's event loop until every client is dropped.
    ///
    /// `context` is handed to every hook of every record.
    pub async fn run(mut self, context: T::Context) {
        // Short type name, e.g. "Tenant" rather than "tenant_forge::model::tenant::Tenant"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Some(key) = item.unique_key() {
                        if self.find_by_key(&key).is_some() {
                            warn!(entity_type, %key, "Unique key taken");
                            let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                            continue;
                        }
                    }
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.next_id += 1;
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), "Query");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Upsert { params, respond_to } => {
                    debug!(entity_type, ?params, "Upsert");
                    let provisional = T::Id::from(self.next_id);
                    let mut candidate = match T::from_create_params(provisional.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Upsert failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    let existing = candidate.unique_key().and_then(|key| self.find_by_key(&key));

                    if let Some(id) = existing {
                        let Some(item) = self.store.get_mut(&id) else {
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                            continue;
                        };
                        if let Err(e) = item.on_upsert(candidate, &context).await {
                            warn!(entity_type, %id, error = %e, "on_upsert failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Upserted existing");
                        let _ = respond_to.send(Ok(UpsertOutcome { id, created: false }));
                    } else {
                        if let Err(e) = candidate.on_create(&context).await {
                            warn!(entity_type, error = %e, "on_create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.next_id += 1;
                        self.store.insert(provisional.clone(), candidate);
                        info!(entity_type, id = %provisional, size = self.store.len(), "Upserted new");
                        let _ = respond_to.send(Ok(UpsertOutcome {
                            id: provisional,
                            created: true,
                        }));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
