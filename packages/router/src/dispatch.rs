//! Forwarding operations to subvolumes.

use std::sync::Arc;

use async_trait::async_trait;
use rio_fop::{Operation, Reply};
use rio_layout::Subvolume;
use tokio::runtime::Handle;

use crate::classify::ReplyShape;
use crate::error::ForwardError;
use crate::pending::{Completion, Continuation, PendingCall};

/// The call-forwarding substrate: delivers an operation to one subvolume and
/// yields its reply.
///
/// A subvolume's own failures (ENOENT, EIO, ...) are `Ok` replies with a
/// negative `op_ret`. `Err` is reserved for failures to deliver the call.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn Forwarder>`.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, subvolume: &Subvolume, operation: Operation)
        -> Result<Reply, ForwardError>;
}

#[async_trait]
impl<T: Forwarder + ?Sized> Forwarder for Arc<T> {
    async fn forward(
        &self,
        subvolume: &Subvolume,
        operation: Operation,
    ) -> Result<Reply, ForwardError> {
        self.as_ref().forward(subvolume, operation).await
    }
}

#[async_trait]
impl<T: Forwarder + ?Sized> Forwarder for Box<T> {
    async fn forward(
        &self,
        subvolume: &Subvolume,
        operation: Operation,
    ) -> Result<Reply, ForwardError> {
        self.as_ref().forward(subvolume, operation).await
    }
}

/// Sends each operation to exactly one subvolume, exactly once.
///
/// Every dispatched call runs as its own task on the current tokio runtime,
/// so calls on different subvolumes proceed independently.
#[derive(Clone)]
pub struct Dispatcher {
    forwarder: Arc<dyn Forwarder>,
}

impl Dispatcher {
    pub fn new<F: Forwarder + 'static>(forwarder: F) -> Self {
        Self {
            forwarder: Arc::new(forwarder),
        }
    }

    pub fn from_shared(forwarder: Arc<dyn Forwarder>) -> Self {
        Self { forwarder }
    }

    /// Forward `operation` to `subvolume` and return the caller's completion.
    ///
    /// The reply is normalized per `shape` before the completion resolves.
    pub fn dispatch(
        &self,
        operation: Operation,
        subvolume: Subvolume,
        shape: ReplyShape,
    ) -> Completion {
        let (pending, completion) = PendingCall::new(operation.kind, subvolume.clone());
        let continuation = Continuation::new(pending, shape);

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                continuation.on_forward_error(ForwardError::Transport(Box::new(e)));
                return completion;
            }
        };

        let forwarder = self.forwarder.clone();
        handle.spawn(async move {
            match forwarder.forward(&subvolume, operation).await {
                Ok(reply) => continuation.on_reply(reply),
                Err(e) => continuation.on_forward_error(e),
            }
        });
        completion
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}
