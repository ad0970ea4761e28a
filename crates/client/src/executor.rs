// Path: crates/client/src/executor.rs

//! Submits prepared calls and drives their records through the store.
//!
//! Each submission gets its own tracking task, which consumes the call's status
//! stream and writes the transitions into the injected [`ExtrinsicUpdater`]:
//!
//! ```text
//! Ready ──► InBlock ──► Finalized
//!   │          │
//!   └──────────┴──────► Error
//! ```
//!
//! The record is created on the first `Ready` notification. A call that fails to
//! sign or submit never produces one; the failure is returned to the caller instead.
//! The task unsubscribes as soon as it applies a terminal transition, so at most one
//! terminal write happens per call.

use crate::decode::decode_dispatch_error;
use crate::store::ExtrinsicUpdater;
use extrack_api::{ChainClient, Signer, SubmittableCall, Subscription, TxPoolStatus, TxUpdate};
use extrack_telemetry::{error_metrics, extrinsic_metrics, time::Timer};
use extrack_types::{
    app::{normalize_hash, now_millis, CallSummary, EventRecord, ExtrinsicStatus, TransactionRecord, TxHash},
    error::{ErrorCode, ExecutorError},
};
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;

type HashCallback = Box<dyn FnOnce(&str) + Send>;
type FinalizedCallback = Box<dyn FnOnce(&str, &[EventRecord]) + Send>;

/// Optional lifecycle callbacks for one submission. Each fires at most once.
#[derive(Default)]
pub struct TxCallbacks {
    on_ready: Option<HashCallback>,
    on_finalized: Option<FinalizedCallback>,
    on_error: Option<HashCallback>,
}

impl fmt::Debug for TxCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxCallbacks")
            .field("on_ready", &self.on_ready.is_some())
            .field("on_finalized", &self.on_finalized.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

impl TxCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the transaction hash when the call enters the ready pool.
    pub fn on_ready(mut self, f: impl FnOnce(&str) + Send + 'static) -> Self {
        self.on_ready = Some(Box::new(f));
        self
    }

    /// Called with the hash and emitted events once the call's block is finalized.
    pub fn on_finalized(mut self, f: impl FnOnce(&str, &[EventRecord]) + Send + 'static) -> Self {
        self.on_finalized = Some(Box::new(f));
        self
    }

    /// Called with the decoded message when the call fails to dispatch.
    pub fn on_error(mut self, f: impl FnOnce(&str) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

/// How a tracked submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtrinsicOutcome {
    /// The call's block was finalized.
    Finalized { hash: TxHash, block_hash: String },
    /// The call was included but failed to dispatch.
    Failed { hash: TxHash, message: String },
    /// The stream closed before a terminal notification. `hash` is `None` if the
    /// call never reached the ready pool.
    Abandoned { hash: Option<TxHash> },
}

impl ExtrinsicOutcome {
    pub fn is_finalized(&self) -> bool {
        matches!(self, Self::Finalized { .. })
    }
}

/// A handle on a submission's tracking task.
///
/// Dropping the handle detaches the task; tracking continues.
#[derive(Debug)]
pub struct ExtrinsicHandle {
    task: JoinHandle<ExtrinsicOutcome>,
}

impl ExtrinsicHandle {
    /// Waits for the submission to reach a terminal state or lose its stream.
    pub async fn outcome(self) -> ExtrinsicOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(target: "executor", error = %e, "Tracking task ended abnormally");
                ExtrinsicOutcome::Abandoned { hash: None }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Submits calls and records their lifecycle.
#[derive(Debug, Clone)]
pub struct Executor {
    updater: Arc<dyn ExtrinsicUpdater>,
}

impl Executor {
    pub fn new(updater: Arc<dyn ExtrinsicUpdater>) -> Self {
        Self { updater }
    }

    /// Signs `call` as `sender` with `signer`, submits it, and starts tracking it.
    ///
    /// Resolves once the status subscription is installed, long before the call is
    /// final. Use the callbacks or [`ExtrinsicHandle::outcome`] to follow it.
    pub async fn execute(
        &self,
        call: &dyn SubmittableCall,
        sender: &str,
        client: Arc<dyn ChainClient>,
        signer: Arc<dyn Signer>,
        callbacks: TxCallbacks,
    ) -> Result<ExtrinsicHandle, ExecutorError> {
        let summary = call.to_human();
        extrinsic_metrics().inc_submitted("signed");
        let subscription = call
            .sign_and_send(sender, signer)
            .await
            .map_err(|e| rejected(&summary, e))?;
        tracing::debug!(
            target: "executor",
            section = %summary.section,
            method = %summary.method,
            %sender,
            "Submitted signed call"
        );
        Ok(self.track(
            subscription,
            Tracker {
                updater: self.updater.clone(),
                client,
                summary,
                sender: sender.to_string(),
                is_signed: true,
                callbacks,
            },
        ))
    }

    /// Submits `call` unsigned and starts tracking it. The record's sender is empty.
    pub async fn execute_unsigned(
        &self,
        call: &dyn SubmittableCall,
        client: Arc<dyn ChainClient>,
        callbacks: TxCallbacks,
    ) -> Result<ExtrinsicHandle, ExecutorError> {
        let summary = call.to_human();
        extrinsic_metrics().inc_submitted("unsigned");
        let subscription = call.send().await.map_err(|e| rejected(&summary, e))?;
        tracing::debug!(
            target: "executor",
            section = %summary.section,
            method = %summary.method,
            "Submitted unsigned call"
        );
        Ok(self.track(
            subscription,
            Tracker {
                updater: self.updater.clone(),
                client,
                summary,
                sender: String::new(),
                is_signed: false,
                callbacks,
            },
        ))
    }

    fn track(&self, subscription: Subscription, tracker: Tracker) -> ExtrinsicHandle {
        ExtrinsicHandle {
            task: tokio::spawn(tracker.run(subscription)),
        }
    }
}

fn rejected(summary: &CallSummary, e: ExecutorError) -> ExecutorError {
    tracing::warn!(
        target: "executor",
        section = %summary.section,
        method = %summary.method,
        error = %e,
        "Call rejected before reaching the pool"
    );
    error_metrics().inc_error("executor", e.code());
    e
}

struct Tracker {
    updater: Arc<dyn ExtrinsicUpdater>,
    client: Arc<dyn ChainClient>,
    summary: CallSummary,
    sender: String,
    is_signed: bool,
    callbacks: TxCallbacks,
}

impl Tracker {
    async fn run(mut self, mut subscription: Subscription) -> ExtrinsicOutcome {
        let metrics = extrinsic_metrics();
        let mut tracked: Option<TxHash> = None;
        let mut timer: Option<Timer<'static>> = None;

        while let Some(update) = subscription.next().await {
            let hash = normalize_hash(&update.tx_hash);

            if update.is_ready() && tracked.is_none() {
                self.on_ready(&hash);
                metrics.inc_records_created();
                timer = Some(Timer::new(metrics));
                tracked = Some(hash.clone());
            }

            if let Some(block_hash) = update.in_block() {
                let block_hash = normalize_hash(block_hash);
                self.updater.add_block_hash(&hash, &block_hash);
                tracing::debug!(target: "executor", %hash, %block_hash, "Extrinsic included");
            }

            if let Some(error) = &update.dispatch_error {
                let message = decode_dispatch_error(error, self.client.as_ref());
                self.updater.update_extrinsic_error(&hash, &message);
                tracing::warn!(target: "executor", %hash, %message, "Extrinsic failed to dispatch");
                if let Some(on_error) = self.callbacks.on_error.take() {
                    on_error(&message);
                }
                subscription.unsubscribe();
                metrics.inc_terminal(ExtrinsicStatus::Error.as_str());
                return ExtrinsicOutcome::Failed { hash, message };
            }

            match &update.status {
                TxPoolStatus::Finalized(block_hash) => {
                    return self.on_finalized(&mut subscription, hash, block_hash, &update);
                }
                TxPoolStatus::Dropped | TxPoolStatus::Invalid | TxPoolStatus::Usurped(_) => {
                    tracing::warn!(target: "executor", %hash, status = ?update.status, "Extrinsic left the pool");
                }
                _ => {}
            }
        }

        if let Some(timer) = timer {
            timer.discard();
        }
        tracing::warn!(
            target: "executor",
            hash = tracked.as_deref().unwrap_or("<none>"),
            "Status stream closed before a terminal state"
        );
        ExtrinsicOutcome::Abandoned { hash: tracked }
    }

    fn on_ready(&mut self, hash: &str) {
        let record = TransactionRecord::ready(
            hash.to_string(),
            self.summary.clone(),
            self.sender.clone(),
            self.is_signed,
            now_millis(),
        );
        self.updater.add_extrinsic(hash, record);
        tracing::info!(
            target: "executor",
            %hash,
            section = %self.summary.section,
            method = %self.summary.method,
            signed = self.is_signed,
            "Extrinsic ready"
        );
        if let Some(on_ready) = self.callbacks.on_ready.take() {
            on_ready(hash);
        }
    }

    fn on_finalized(
        &mut self,
        subscription: &mut Subscription,
        hash: TxHash,
        block_hash: &str,
        update: &TxUpdate,
    ) -> ExtrinsicOutcome {
        let block_hash = normalize_hash(block_hash);
        self.updater
            .update_extrinsic_status(&hash, ExtrinsicStatus::IsFinalized);
        tracing::info!(target: "executor", %hash, %block_hash, "Extrinsic finalized");
        if let Some(on_finalized) = self.callbacks.on_finalized.take() {
            on_finalized(&hash, &update.events);
        }
        subscription.unsubscribe();
        extrinsic_metrics().inc_terminal(ExtrinsicStatus::IsFinalized.as_str());
        ExtrinsicOutcome::Finalized { hash, block_hash }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_debug_shows_which_are_set() {
        let callbacks = TxCallbacks::new().on_ready(|_| {});
        let rendered = format!("{callbacks:?}");
        assert!(rendered.contains("on_ready: true"));
        assert!(rendered.contains("on_error: false"));
    }

    #[test]
    fn outcome_finalized_predicate() {
        let outcome = ExtrinsicOutcome::Finalized {
            hash: "0xabc".into(),
            block_hash: "0xb10c".into(),
        };
        assert!(outcome.is_finalized());
        assert!(!ExtrinsicOutcome::Abandoned { hash: None }.is_finalized());
    }
}
