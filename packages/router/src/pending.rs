//! Pending calls and their completions.
//!
//! Each dispatched operation owns exactly one [`PendingCall`], held by the
//! [`Continuation`] registered with the forwarded call. Completing a pending
//! call consumes it, so the caller can be completed at most once; dropping it
//! uncompleted completes the caller with [`ForwardError::Dropped`], so the
//! caller is completed at least once.
//!
//! The caller side is a [`Completion`]: a future that resolves exactly once.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use rio_fop::{FopKind, Reply};
use rio_layout::Subvolume;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::warn;

use crate::classify::ReplyShape;
use crate::error::{ForwardError, RouteError};
use crate::normalize::normalize;

type Outcome = Result<Reply, RouteError>;

/// The caller's side of a routed operation.
///
/// Resolves to the normalized reply or to the error that terminated the
/// operation. Dropping a `Completion` does not cancel the forwarded call.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<Outcome>,
    kind: FopKind,
}

impl Completion {
    /// A completion that has already failed, without any pending call.
    pub(crate) fn failed(kind: FopKind, error: RouteError) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(error));
        Self { rx, kind }
    }

    pub fn kind(&self) -> FopKind {
        self.kind
    }

    /// Take the outcome if the operation has already terminated, or get the
    /// completion back to keep waiting on.
    ///
    /// Consumes the completion on success, so an outcome can only be
    /// observed once.
    pub fn try_outcome(mut self) -> Result<Outcome, Self> {
        match self.rx.try_recv() {
            Ok(outcome) => Ok(outcome),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Closed) => Ok(Err(self.lost())),
        }
    }

    // The sender always sends before it goes away; a closed channel means
    // the pending call was lost some other way.
    fn lost(&self) -> RouteError {
        RouteError::Forwarding {
            kind: self.kind,
            subvolume: String::new(),
            source: ForwardError::Dropped,
        }
    }
}

impl Future for Completion {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let received = Pin::new(&mut self.rx).poll(cx);
        received.map(|received| received.unwrap_or_else(|_| Err(self.lost())))
    }
}

/// The router's side of one in-flight forwarded call.
#[derive(Debug)]
pub struct PendingCall {
    tx: Option<oneshot::Sender<Outcome>>,
    kind: FopKind,
    subvolume: Subvolume,
}

impl PendingCall {
    /// Create the pending call for `kind` dispatched to `subvolume`, and the
    /// completion its caller waits on.
    pub fn new(kind: FopKind, subvolume: Subvolume) -> (Self, Completion) {
        let (tx, rx) = oneshot::channel();
        let pending = Self {
            tx: Some(tx),
            kind,
            subvolume,
        };
        (pending, Completion { rx, kind })
    }

    pub fn kind(&self) -> FopKind {
        self.kind
    }

    pub fn subvolume(&self) -> &Subvolume {
        &self.subvolume
    }

    /// Complete the caller. Consumes the pending call.
    pub fn complete(mut self, outcome: Outcome) {
        self.send(outcome);
    }

    fn send(&mut self, outcome: Outcome) {
        if let Some(tx) = self.tx.take() {
            // The caller may have stopped waiting; nothing to do then.
            let _ = tx.send(outcome);
        }
    }

    fn forwarding_error(&self, source: ForwardError) -> RouteError {
        RouteError::Forwarding {
            kind: self.kind,
            subvolume: self.subvolume.name().to_string(),
            source,
        }
    }
}

impl Drop for PendingCall {
    fn drop(&mut self) {
        if self.tx.is_some() {
            warn!(
                fop = %self.kind,
                subvolume = %self.subvolume,
                "pending call released without a reply"
            );
            let error = self.forwarding_error(ForwardError::Dropped);
            self.send(Err(error));
        }
    }
}

/// What runs when a forwarded call comes back.
///
/// Exactly one of [`Continuation::on_reply`] or
/// [`Continuation::on_forward_error`] is invoked per dispatched call; both
/// consume the continuation.
#[derive(Debug)]
pub struct Continuation {
    pending: PendingCall,
    shape: ReplyShape,
}

impl Continuation {
    pub fn new(pending: PendingCall, shape: ReplyShape) -> Self {
        Self { pending, shape }
    }

    pub fn kind(&self) -> FopKind {
        self.pending.kind()
    }

    pub fn subvolume(&self) -> &Subvolume {
        self.pending.subvolume()
    }

    /// Normalize the reply and complete the caller with it.
    pub fn on_reply(self, reply: Reply) {
        let reply = normalize(
            self.pending.kind(),
            self.pending.subvolume(),
            self.shape,
            reply,
        );
        self.pending.complete(Ok(reply));
    }

    /// Complete the caller with a forwarding failure.
    pub fn on_forward_error(self, source: ForwardError) {
        warn!(
            fop = %self.pending.kind(),
            subvolume = %self.pending.subvolume(),
            error = %source,
            "forwarding failed"
        );
        let error = self.pending.forwarding_error(source);
        self.pending.complete(Err(error));
    }
}
