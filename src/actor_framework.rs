use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with create/merge hooks)
// =============================================================================

/// Failures raised by the framework itself rather than by an entity's rules.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Id generator returned an id already in use: {0}")]
    IdCollision(String),
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Debug;
    type Patch: Send + Debug;
    type Error: std::error::Error + From<FrameworkError> + Send + 'static;

    /// Short name used in log fields.
    const NAME: &'static str;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from a freshly generated ID and the payload.
    /// Must not have side effects: on error the ID is discarded.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, Self::Error>;

    /// Build the successor of `self` with the patch applied.
    ///
    /// `self` is borrowed, so a rejected patch leaves the stored value as it was.
    fn merge(&self, patch: Self::Patch) -> Result<Self, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    #[cfg(test)]
    Count {
        respond_to: Response<usize, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the entity map. Requests are handled one at a time, so every
/// validate-then-write sequence completes before the next request is read.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = T::NAME))]
    pub async fn run(mut self) {
        info!("Actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(self.handle_get(id));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                #[cfg(test)]
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!(entries = self.store.len(), "Actor stopped");
    }

    #[instrument(skip(self, payload))]
    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, T::Error> {
        debug!("Processing create request");

        let id = (self.next_id_fn)();
        if self.store.contains_key(&id) {
            warn!(id = %id, "Id generator returned an id already in use");
            return Err(FrameworkError::IdCollision(id.to_string()).into());
        }

        match T::from_create(id.clone(), payload) {
            Ok(item) => {
                info!(id = %item.id(), "Created");
                self.store.insert(id, item.clone());
                Ok(item)
            }
            Err(e) => {
                warn!(error = %e, "Create rejected");
                Err(e)
            }
        }
    }

    #[instrument(fields(id = %id), skip(self, id))]
    fn handle_get(&self, id: T::Id) -> Result<T, T::Error> {
        debug!("Processing get request");

        match self.store.get(&id) {
            Some(item) => Ok(item.clone()),
            None => {
                debug!("Not found");
                Err(FrameworkError::NotFound(id.to_string()).into())
            }
        }
    }

    #[instrument(fields(id = %id), skip(self, id, patch))]
    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        debug!("Processing update request");

        let Some(current) = self.store.get(&id) else {
            debug!("Not found");
            return Err(FrameworkError::NotFound(id.to_string()).into());
        };

        let updated = current.merge(patch).map_err(|e| {
            warn!(error = %e, "Update rejected");
            e
        })?;

        self.store.insert(id, updated.clone());
        info!("Updated");
        Ok(updated)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Derived Clone would demand `T: Clone` on every associated type.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        request: ResourceRequest<T>,
        response: oneshot::Receiver<Result<R, T::Error>>,
    ) -> Result<R, T::Error> {
        self.sender
            .send(request)
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.call(ResourceRequest::Create { payload, respond_to }, response)
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<T, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.call(ResourceRequest::Get { id, respond_to }, response)
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.call(ResourceRequest::Update { id, patch, respond_to }, response)
            .await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.call(ResourceRequest::Count { respond_to }, response)
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
