use resource_actor::{ActorEntity, Filter, FrameworkError, ResourceActor};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Member {
    id: u32,
    email: String,
    name: String,
    active: bool,
}

#[derive(Debug)]
struct MemberCreate {
    email: String,
    name: String,
}

#[derive(Debug)]
struct MemberUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum MemberAction {
    Deactivate,
}

#[derive(Debug, thiserror::Error)]
enum MemberError {
    #[error("Email must not be empty")]
    EmptyEmail,
}

#[async_trait]
impl ActorEntity for Member {
    type Id = u32;
    type Create = MemberCreate;
    type Update = MemberUpdate;
    type Action = MemberAction;
    type ActionResult = bool;
    type Context = ();
    type Error = MemberError;

    fn from_create_params(id: u32, params: MemberCreate) -> Result<Self, Self::Error> {
        if params.email.is_empty() {
            return Err(MemberError::EmptyEmail);
        }
        Ok(Self {
            id,
            email: params.email.to_lowercase(),
            name: params.name,
            active: true,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    async fn on_update(
        &mut self,
        update: MemberUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn on_upsert(&mut self, candidate: Self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        self.name = candidate.name;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: MemberAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            MemberAction::Deactivate => {
                let changed = self.active;
                self.active = false;
                Ok(changed)
            }
        }
    }
}

fn member(email: &str, name: &str) -> MemberCreate {
    MemberCreate {
        email: email.into(),
        name: name.into(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(member("ana@example.com", "Ana")).await.unwrap();
    assert_eq!(id, 1);

    // 2. Action
    let changed = client
        .perform_action(id, MemberAction::Deactivate)
        .await
        .unwrap();
    assert!(changed);
    let changed_again = client
        .perform_action(id, MemberAction::Deactivate)
        .await
        .unwrap();
    assert!(!changed_again);

    // 3. Update
    let updated: Member = client
        .update(
            id,
            MemberUpdate {
                name: Some("Ana María".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Ana María");
    assert!(!updated.active);

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_unique_key_conflict() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    client.create(member("ana@example.com", "Ana")).await.unwrap();
    let err = client
        .create(member("ANA@example.com", "Ana 2"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    // A rejected create does not consume an id
    let next = client.create(member("beto@example.com", "Beto")).await.unwrap();
    assert_eq!(next, 2);
}

#[tokio::test]
async fn test_upsert_folds_into_existing() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.upsert(member("ana@example.com", "Ana")).await.unwrap();
    assert!(first.created);

    let second = client
        .upsert(member("ana@example.com", "Ana Updated"))
        .await
        .unwrap();
    assert!(!second.created);
    assert_eq!(second.id, first.id);

    let stored = client.get(first.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Ana Updated");

    let all = client.query(Filter::all()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_query_returns_id_order() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    for (email, name) in [("c@x.io", "C"), ("a@x.io", "A"), ("b@x.io", "B")] {
        client.create(member(email, name)).await.unwrap();
    }
    client.perform_action(2, MemberAction::Deactivate).await.unwrap();

    let active = client.query(Filter::new(|m: &Member| m.active)).await.unwrap();
    let names: Vec<_> = active.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["C", "B"]);
}

#[tokio::test]
async fn test_entity_error_is_boxed() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(member("", "Nobody")).await.unwrap_err();
    match err {
        FrameworkError::EntityError(inner) => {
            assert!(inner.downcast_ref::<MemberError>().is_some());
        }
        other => panic!("Expected EntityError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_closed_actor() {
    let (actor, client) = ResourceActor::<Member>::new(10);
    drop(actor);

    let err = client.get(1).await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
}
