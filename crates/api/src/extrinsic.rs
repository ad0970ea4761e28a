// Path: crates/api/src/extrinsic.rs
//! Defines prepared calls and the status stream a submission produces.

use crate::extension::Signer;
use async_trait::async_trait;
use extrack_types::{
    app::{CallSummary, DispatchError, EventRecord},
    error::ExecutorError,
};
use std::fmt::{self, Debug};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The transaction pool status carried by a status notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxPoolStatus {
    /// Waiting on a nonce gap.
    Future,
    /// Accepted into the ready queue.
    Ready,
    /// Broadcast to the listed peers.
    Broadcast(Vec<String>),
    /// Included in the block with this hash.
    InBlock(String),
    /// The including block was retracted.
    Retracted(String),
    /// Finality was not reached within the pool's window.
    FinalityTimeout(String),
    /// Included in the finalized block with this hash.
    Finalized(String),
    /// Replaced by another transaction with the same nonce.
    Usurped(String),
    /// Dropped from the pool.
    Dropped,
    /// Declared invalid by the pool.
    Invalid,
}

/// One notification from a submission's status stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TxUpdate {
    /// The transaction hash as reported by the client (any case).
    pub tx_hash: String,
    /// Current pool status.
    pub status: TxPoolStatus,
    /// Set when the call was included but failed to dispatch.
    pub dispatch_error: Option<DispatchError>,
    /// Events emitted by the call, once included.
    pub events: Vec<EventRecord>,
}

impl TxUpdate {
    /// A notification with no dispatch error and no events.
    pub fn new(tx_hash: impl Into<String>, status: TxPoolStatus) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            status,
            dispatch_error: None,
            events: Vec::new(),
        }
    }

    /// Attaches a dispatch error.
    pub fn with_dispatch_error(mut self, error: DispatchError) -> Self {
        self.dispatch_error = Some(error);
        self
    }

    /// Attaches emitted events.
    pub fn with_events(mut self, events: Vec<EventRecord>) -> Self {
        self.events = events;
        self
    }

    /// Whether the call just entered the ready pool.
    pub fn is_ready(&self) -> bool {
        matches!(self.status, TxPoolStatus::Ready)
    }

    /// The including block hash, if the call is in a (non-final) block.
    pub fn in_block(&self) -> Option<&str> {
        match &self.status {
            TxPoolStatus::InBlock(hash) => Some(hash),
            _ => None,
        }
    }

    /// Whether the call's block was finalized.
    pub fn is_finalized(&self) -> bool {
        matches!(self.status, TxPoolStatus::Finalized(_))
    }
}

type Unsubscribe = Box<dyn FnOnce() + Send>;

/// A live status subscription for one submitted call.
///
/// Dropping the subscription tears it down, so a consumer that exits early never
/// leaves the client streaming into a closed channel.
pub struct Subscription {
    updates: mpsc::UnboundedReceiver<TxUpdate>,
    unsubscribe: Option<Unsubscribe>,
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl Subscription {
    /// Wraps a notification channel and the client's unsubscribe handle.
    pub fn new(
        updates: mpsc::UnboundedReceiver<TxUpdate>,
        unsubscribe: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            updates,
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Waits for the next notification. `None` once the client closed the stream.
    pub async fn next(&mut self) -> Option<TxUpdate> {
        self.updates.recv().await
    }

    /// Cancels the subscription. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(unsub) = self.unsubscribe.take() {
            unsub();
        }
        self.updates.close();
    }

    /// Whether `unsubscribe` has not yet run.
    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// A prepared call, ready to be signed and submitted.
#[async_trait]
pub trait SubmittableCall: Send + Sync + Debug {
    /// The call's decoded, human-readable form.
    fn to_human(&self) -> CallSummary;

    /// Signs the call as `sender` with `signer` and submits it.
    ///
    /// Resolves once the node accepted the submission and the status subscription is
    /// installed; signing or transport failures resolve to `Err` before that point.
    async fn sign_and_send(
        &self,
        sender: &str,
        signer: Arc<dyn Signer>,
    ) -> Result<Subscription, ExecutorError>;

    /// Submits the call unsigned.
    async fn send(&self) -> Result<Subscription, ExecutorError>;
}
