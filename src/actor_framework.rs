use std::fmt::Debug;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Errors raised by the channel plumbing itself, independent of the entity.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any stateful resource must implement to be owned by a ResourceActor.
///
/// The actor hands every action to the entity one at a time, so an action runs
/// to completion before the next one is looked at.
#[async_trait]
pub trait Entity: Send + 'static {
    type Action: Send + Debug;
    type ActionResult: Send + Debug;
    type Error: Send + Debug + From<FrameworkError>;

    /// Handle a domain-specific action
    async fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

pub enum ResourceRequest<T: Entity> {
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Shutdown,
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    entity: T,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, entity: T) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, entity };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self))]
    pub async fn run(mut self) {
        info!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Action { action, respond_to } => {
                    debug!(?action, "Processing action");
                    let result = self.entity.handle_action(action).await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Shutdown => {
                    info!("Actor shutting down");
                    break;
                }
            }
        }
        info!("Actor stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn perform_action(&self, action: T::Action) -> Result<T::ActionResult, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(ResourceRequest::Action { action, respond_to })
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn shutdown(&self) -> Result<(), FrameworkError> {
        self.sender.send(ResourceRequest::Shutdown)
            .await.map_err(|_| FrameworkError::ActorClosed)
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
