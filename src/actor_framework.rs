use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    // --- Custom Actions ---
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// Errors produced by the generic resource layer. Domain clients translate
/// these into their own error enums.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Generic type aliases for bespoke service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Subscribe {
        respond_to: Response<watch::Receiver<Vec<T>>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    snapshots: watch::Sender<Vec<T>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, _) = watch::channel(Vec::new());
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
            snapshots,
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    /// Republish the full collection to subscribers after a mutation.
    fn publish(&self) {
        let _ = self.snapshots.send(self.store.values().cloned().collect());
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_create(id.clone(), payload) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create() {
                                let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            self.publish();
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.values().cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(patch) {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                            continue;
                        }
                        let updated = item.clone();
                        self.publish();
                        let _ = respond_to.send(Ok(updated));
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(format!("{}", id))));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete() {
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                            continue;
                        }
                        self.store.remove(&id);
                        self.publish();
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(format!("{}", id))));
                    }
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action)
                            .map_err(FrameworkError::Rejected);
                        self.publish();
                        let _ = respond_to.send(result);
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(format!("{}", id))));
                    }
                }
                ResourceRequest::Subscribe { respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshots.subscribe()));
                }
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    /// Build a client over an existing channel (used by the mock framework).
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        make: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn subscribe(&self) -> Result<watch::Receiver<Vec<T>>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Subscribe { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct LoyaltyAccount {
        id: String,
        owner: String,
        points: u32,
    }

    #[derive(Debug)]
    struct LoyaltyCreate {
        owner: String,
    }

    #[derive(Debug)]
    struct LoyaltyPatch {
        owner: Option<String>,
    }

    #[derive(Debug)]
    enum LoyaltyAction {
        AddPoints(u32),
        Redeem(u32),
    }

    impl Entity for LoyaltyAccount {
        type Id = String;
        type CreatePayload = LoyaltyCreate;
        type Patch = LoyaltyPatch;
        type Action = LoyaltyAction;
        type ActionResult = u32;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create(id: String, payload: LoyaltyCreate) -> Result<Self, String> {
            Ok(Self {
                id,
                owner: payload.owner,
                points: 0,
            })
        }

        fn on_update(&mut self, patch: LoyaltyPatch) -> Result<(), String> {
            if let Some(owner) = patch.owner {
                self.owner = owner;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: LoyaltyAction) -> Result<u32, String> {
            match action {
                LoyaltyAction::AddPoints(n) => {
                    self.points += n;
                    Ok(self.points)
                }
                LoyaltyAction::Redeem(n) => {
                    if self.points < n {
                        return Err(format!("Insufficient points: {} < {}", self.points, n));
                    }
                    self.points -= n;
                    Ok(self.points)
                }
            }
        }
    }

    fn spawn_actor() -> ResourceClient<LoyaltyAccount> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = counter.fetch_add(1, Ordering::SeqCst);
            format!("account_{}", id)
        };
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_actor();

        let id = client
            .create(LoyaltyCreate { owner: "Alice".into() })
            .await
            .unwrap();

        let balance = client
            .perform_action(id.clone(), LoyaltyAction::AddPoints(50))
            .await
            .unwrap();
        assert_eq!(balance, 50);

        let account = client.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(account.points, 50);

        // Rejected action surfaces the entity's error message
        let err = client
            .perform_action(id.clone(), LoyaltyAction::Redeem(100))
            .await
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_unknown_id_is_a_typed_not_found() {
        let client = spawn_actor();

        let err = client
            .perform_action("missing".to_string(), LoyaltyAction::AddPoints(1))
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("missing".to_string()));
    }

    #[tokio::test]
    async fn test_subscription_sees_mutations() {
        let client = spawn_actor();
        let mut snapshots = client.subscribe().await.unwrap();

        let id = client
            .create(LoyaltyCreate { owner: "Bob".into() })
            .await
            .unwrap();

        snapshots.changed().await.unwrap();
        let seen = snapshots.borrow().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, id);
    }
}
