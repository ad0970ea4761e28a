// Path: crates/test_utils/src/extrinsic.rs
//! A mock submittable call whose status stream is driven by the test.

use async_trait::async_trait;
use extrack_api::{Signer, SubmittableCall, Subscription, TxPoolStatus, TxUpdate};
use extrack_types::{
    app::{CallSummary, DispatchError, EventRecord},
    error::ExecutorError,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Default)]
struct FeedInner {
    sender: Mutex<Option<mpsc::UnboundedSender<TxUpdate>>>,
    unsubscribed: AtomicUsize,
    submissions: AtomicUsize,
}

/// The test's end of a [`MockCall`]'s status stream.
#[derive(Debug, Clone)]
pub struct StatusFeed {
    inner: Arc<FeedInner>,
    tx_hash: String,
}

impl StatusFeed {
    /// Delivers a raw notification. Returns `false` if nobody is subscribed.
    pub fn send(&self, update: TxUpdate) -> bool {
        match self.inner.sender.lock().as_ref() {
            Some(sender) => sender.send(update).is_ok(),
            None => false,
        }
    }

    pub fn ready(&self) -> bool {
        self.send(TxUpdate::new(&self.tx_hash, TxPoolStatus::Ready))
    }

    pub fn in_block(&self, block_hash: &str) -> bool {
        self.send(TxUpdate::new(
            &self.tx_hash,
            TxPoolStatus::InBlock(block_hash.to_string()),
        ))
    }

    pub fn finalized(&self, block_hash: &str, events: Vec<EventRecord>) -> bool {
        self.send(
            TxUpdate::new(&self.tx_hash, TxPoolStatus::Finalized(block_hash.to_string()))
                .with_events(events),
        )
    }

    /// An in-block notification carrying a dispatch error.
    pub fn dispatch_error(&self, block_hash: &str, error: DispatchError) -> bool {
        self.send(
            TxUpdate::new(&self.tx_hash, TxPoolStatus::InBlock(block_hash.to_string()))
                .with_dispatch_error(error),
        )
    }

    /// Closes the stream from the client side without a terminal notification.
    pub fn close(&self) {
        self.inner.sender.lock().take();
    }

    /// How many times the subscription's unsubscribe handle ran.
    pub fn unsubscribe_count(&self) -> usize {
        self.inner.unsubscribed.load(Ordering::SeqCst)
    }

    /// How many times the call was submitted.
    pub fn submissions(&self) -> usize {
        self.inner.submissions.load(Ordering::SeqCst)
    }

    /// Whether a subscriber is attached and listening.
    pub fn is_subscribed(&self) -> bool {
        self.inner
            .sender
            .lock()
            .as_ref()
            .map_or(false, |s| !s.is_closed())
    }
}

/// A prepared call that reports a fixed hash and exposes its stream through a [`StatusFeed`].
#[derive(Debug)]
pub struct MockCall {
    summary: CallSummary,
    tx_hash: String,
    submit_error: Option<String>,
    script: Vec<TxUpdate>,
    feed: Arc<FeedInner>,
}

impl MockCall {
    pub fn new(summary: CallSummary, tx_hash: &str) -> Self {
        Self {
            summary,
            tx_hash: tx_hash.to_string(),
            submit_error: None,
            script: Vec::new(),
            feed: Arc::new(FeedInner::default()),
        }
    }

    /// The node rejects the submission itself.
    pub fn rejecting(mut self, reason: &str) -> Self {
        self.submit_error = Some(reason.to_string());
        self
    }

    /// Notifications queued as soon as the subscription is installed.
    pub fn with_script(mut self, script: Vec<TxUpdate>) -> Self {
        self.script = script;
        self
    }

    /// The hash as the client reports it.
    pub fn tx_hash(&self) -> &str {
        &self.tx_hash
    }

    /// The test's handle on the status stream.
    pub fn feed(&self) -> StatusFeed {
        StatusFeed {
            inner: self.feed.clone(),
            tx_hash: self.tx_hash.clone(),
        }
    }

    fn subscribe(&self) -> Result<Subscription, ExecutorError> {
        if let Some(reason) = &self.submit_error {
            return Err(ExecutorError::Submission(reason.clone()));
        }
        self.feed.submissions.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel();
        for update in &self.script {
            let _ = tx.send(update.clone());
        }
        *self.feed.sender.lock() = Some(tx);
        let feed = self.feed.clone();
        Ok(Subscription::new(rx, move || {
            feed.unsubscribed.fetch_add(1, Ordering::SeqCst);
            feed.sender.lock().take();
        }))
    }
}

#[async_trait]
impl SubmittableCall for MockCall {
    fn to_human(&self) -> CallSummary {
        self.summary.clone()
    }

    async fn sign_and_send(
        &self,
        sender: &str,
        signer: Arc<dyn Signer>,
    ) -> Result<Subscription, ExecutorError> {
        let payload = hex::decode(self.tx_hash.trim_start_matches("0x")).unwrap_or_default();
        signer
            .sign_payload(sender, &payload)
            .await
            .map_err(|e| ExecutorError::Signing(e.to_string()))?;
        self.subscribe()
    }

    async fn send(&self) -> Result<Subscription, ExecutorError> {
        self.subscribe()
    }
}
