// Path: crates/client/tests/executor_lifecycle.rs
//! End-to-end lifecycle of submitted calls through the executor and the store.

use anyhow::{anyhow, Result};
use extrack_api::{ChainClient, Signer, TxPoolStatus, TxUpdate};
use extrack_client::{Executor, ExtrinsicOutcome, ExtrinsicStore, Extrinsics, TxCallbacks};
use extrack_test_utils::{
    fixtures::{self, ALICE},
    MockCall, MockChainClient, MockSigner,
};
use extrack_types::{app::ExtrinsicStatus, error::ExecutorError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Harness {
    store: Arc<ExtrinsicStore>,
    executor: Executor,
    client: Arc<dyn ChainClient>,
    signer: Arc<dyn Signer>,
}

fn harness() -> Harness {
    let store = Arc::new(ExtrinsicStore::new());
    Harness {
        executor: Executor::new(store.clone()),
        store,
        client: Arc::new(MockChainClient::new("picasso")),
        signer: Arc::new(MockSigner::new()),
    }
}

async fn wait_until(store: &ExtrinsicStore, pred: impl Fn(&Extrinsics) -> bool) -> Result<Extrinsics> {
    let mut rx = store.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let snapshot = rx.borrow_and_update().clone();
            if pred(&snapshot) {
                return Ok::<_, anyhow::Error>(snapshot);
            }
            rx.changed().await.map_err(|_| anyhow!("store dropped"))?;
        }
    })
    .await
    .map_err(|_| anyhow!("timed out waiting for store"))?
}

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Clone + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |s: &str| sink.lock().unwrap().push(s.to_string()))
}

#[tokio::test]
async fn ready_creates_signed_record() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::transfer_call(), "0xABC");
    let feed = call.feed();
    let (ready, on_ready) = recorder();

    let _handle = h
        .executor
        .execute(&call, ALICE, h.client.clone(), h.signer.clone(), TxCallbacks::new().on_ready(on_ready))
        .await?;
    assert!(h.store.snapshot().is_empty(), "no record before the pool accepts the call");

    assert!(feed.ready());
    let snapshot = wait_until(&h.store, |m| m.contains_key("0xabc")).await?;

    assert_eq!(snapshot.len(), 1);
    let record = &snapshot["0xabc"];
    assert_eq!(record.status, ExtrinsicStatus::IsReady);
    assert_eq!(record.sender, ALICE);
    assert!(record.is_signed);
    assert_eq!(record.method, "transfer");
    assert_eq!(record.section, "balances");
    assert_eq!(record.args, fixtures::transfer_call().args);
    assert!(record.block_hash.is_none());
    assert_eq!(*ready.lock().unwrap(), ["0xabc"]);
    Ok(())
}

#[tokio::test]
async fn finalized_updates_record_and_notifies_once() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::transfer_call(), "0xabc");
    let feed = call.feed();
    let finalized = Arc::new(Mutex::new(Vec::new()));
    let sink = finalized.clone();

    let handle = h
        .executor
        .execute(
            &call,
            ALICE,
            h.client.clone(),
            h.signer.clone(),
            TxCallbacks::new().on_finalized(move |hash, events| {
                sink.lock().unwrap().push((hash.to_string(), events.len()));
            }),
        )
        .await?;

    feed.ready();
    feed.finalized("0xf1a1", fixtures::success_events());

    let outcome = handle.outcome().await;
    assert_eq!(
        outcome,
        ExtrinsicOutcome::Finalized {
            hash: "0xabc".into(),
            block_hash: "0xf1a1".into(),
        }
    );
    assert_eq!(h.store.snapshot()["0xabc"].status, ExtrinsicStatus::IsFinalized);
    assert_eq!(*finalized.lock().unwrap(), [("0xabc".to_string(), 2)]);
    assert_eq!(feed.unsubscribe_count(), 1);
    assert!(!feed.is_subscribed());
    assert!(!feed.finalized("0xf1a1", Vec::new()), "stream is torn down after the terminal state");
    Ok(())
}

#[tokio::test]
async fn dispatch_error_is_decoded_and_recorded() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::transfer_call(), "0xabc").with_script(vec![
        TxUpdate::new("0xabc", TxPoolStatus::Ready),
        TxUpdate::new("0xabc", TxPoolStatus::InBlock("0xb10c".into()))
            .with_dispatch_error(fixtures::insufficient_balance()),
    ]);
    let feed = call.feed();
    let (errors, on_error) = recorder();

    let handle = h
        .executor
        .execute(&call, ALICE, h.client.clone(), h.signer.clone(), TxCallbacks::new().on_error(on_error))
        .await?;

    let expected = "balances.InsufficientBalance: Balance too low to send value.";
    assert_eq!(
        handle.outcome().await,
        ExtrinsicOutcome::Failed {
            hash: "0xabc".into(),
            message: expected.into(),
        }
    );
    let record = &h.store.snapshot()["0xabc"];
    assert_eq!(record.status, ExtrinsicStatus::Error);
    assert_eq!(record.dispatch_error.as_deref(), Some(expected));
    assert_eq!(record.block_hash.as_deref(), Some("0xb10c"), "failed record keeps its block");
    assert_eq!(*errors.lock().unwrap(), [expected]);
    assert_eq!(feed.unsubscribe_count(), 1);
    Ok(())
}

#[tokio::test]
async fn only_first_terminal_notification_applies() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::transfer_call(), "0xabc").with_script(vec![
        TxUpdate::new("0xabc", TxPoolStatus::Ready),
        TxUpdate::new("0xabc", TxPoolStatus::InBlock("0xb10c".into()))
            .with_dispatch_error(fixtures::insufficient_balance()),
        TxUpdate::new("0xabc", TxPoolStatus::Finalized("0xb10c".into())),
    ]);
    let (finals, on_finalized) = recorder();

    let handle = h
        .executor
        .execute(
            &call,
            ALICE,
            h.client.clone(),
            h.signer.clone(),
            TxCallbacks::new().on_finalized(move |hash, _| on_finalized(hash)),
        )
        .await?;

    assert!(matches!(handle.outcome().await, ExtrinsicOutcome::Failed { .. }));
    assert_eq!(h.store.snapshot()["0xabc"].status, ExtrinsicStatus::Error);
    assert!(finals.lock().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn signing_failure_creates_no_record() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::transfer_call(), "0xabc");
    let feed = call.feed();

    let err = h
        .executor
        .execute(&call, ALICE, h.client.clone(), Arc::new(MockSigner::refusing()), TxCallbacks::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutorError::Signing(_)));
    assert_eq!(feed.submissions(), 0);
    assert!(h.store.snapshot().is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_submission_creates_no_record() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::claim_call(), "0xabc").rejecting("1010: Invalid Transaction");

    let err = h
        .executor
        .execute_unsigned(&call, h.client.clone(), TxCallbacks::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutorError::Submission(reason) if reason.contains("1010")));
    assert!(h.store.snapshot().is_empty());
    Ok(())
}

#[tokio::test]
async fn unsigned_call_records_block_hash() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::claim_call(), "0xC1A1");
    let feed = call.feed();

    let handle = h
        .executor
        .execute_unsigned(&call, h.client.clone(), TxCallbacks::new())
        .await?;

    feed.ready();
    feed.in_block("0xb10c");
    let snapshot = wait_until(&h.store, |m| {
        m.get("0xc1a1").map_or(false, |r| r.status == ExtrinsicStatus::IsInBlock)
    })
    .await?;
    let record = &snapshot["0xc1a1"];
    assert_eq!(record.sender, "");
    assert!(!record.is_signed);
    assert_eq!(record.block_hash.as_deref(), Some("0xb10c"));

    feed.finalized("0xb10c", Vec::new());
    assert!(handle.outcome().await.is_finalized());
    let record = &h.store.snapshot()["0xc1a1"];
    assert_eq!(record.status, ExtrinsicStatus::IsFinalized);
    assert_eq!(record.block_hash.as_deref(), Some("0xb10c"));
    Ok(())
}

#[tokio::test]
async fn block_hash_is_lower_cased() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::claim_call(), "0xC1A1");
    let tx_hash = call.tx_hash().to_ascii_lowercase();
    let call = call.with_script(vec![
        TxUpdate::new("0xC1A1", TxPoolStatus::Ready),
        TxUpdate::new("0xC1A1", TxPoolStatus::InBlock("0xB10CABCD".into())),
        TxUpdate::new("0xC1A1", TxPoolStatus::Finalized("0xB10CABCD".into())),
    ]);

    let handle = h
        .executor
        .execute_unsigned(&call, h.client.clone(), TxCallbacks::new())
        .await?;

    assert_eq!(
        handle.outcome().await,
        ExtrinsicOutcome::Finalized {
            hash: tx_hash.clone(),
            block_hash: "0xb10cabcd".into(),
        }
    );
    let record = &h.store.snapshot()[&tx_hash];
    assert_eq!(record.block_hash.as_deref(), Some("0xb10cabcd"));
    assert_eq!(record.status, ExtrinsicStatus::IsFinalized);
    Ok(())
}

#[tokio::test]
async fn signed_call_records_block_hash_too() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::transfer_call(), "0xabc").with_script(vec![
        TxUpdate::new("0xabc", TxPoolStatus::Ready),
        TxUpdate::new("0xabc", TxPoolStatus::InBlock("0xb10c".into())),
    ]);

    let _handle = h
        .executor
        .execute(&call, ALICE, h.client.clone(), h.signer.clone(), TxCallbacks::new())
        .await?;

    let snapshot = wait_until(&h.store, |m| {
        m.get("0xabc").map_or(false, |r| r.block_hash.is_some())
    })
    .await?;
    assert_eq!(snapshot["0xabc"].status, ExtrinsicStatus::IsInBlock);
    Ok(())
}

#[tokio::test]
async fn closed_stream_leaves_record_pending() -> Result<()> {
    let h = harness();
    let call = MockCall::new(fixtures::transfer_call(), "0xabc");
    let feed = call.feed();
    let handle = h
        .executor
        .execute(&call, ALICE, h.client.clone(), h.signer.clone(), TxCallbacks::new())
        .await?;

    feed.ready();
    feed.close();

    assert_eq!(
        handle.outcome().await,
        ExtrinsicOutcome::Abandoned {
            hash: Some("0xabc".into())
        }
    );
    assert_eq!(h.store.snapshot()["0xabc"].status, ExtrinsicStatus::IsReady);
    Ok(())
}

#[tokio::test]
async fn pending_view_tracks_lifecycle() -> Result<()> {
    let h = harness();
    let view = h.store.view();
    let mut pending = view.pending_extrinsic("transfer", "balances", ALICE);
    let mut calls = view.extrinsic_calls("transfer", "balances", ALICE);
    assert!(!*pending.get());

    let call = MockCall::new(fixtures::transfer_call(), "0xabc");
    let feed = call.feed();
    let handle = h
        .executor
        .execute(&call, ALICE, h.client.clone(), h.signer.clone(), TxCallbacks::new())
        .await?;

    feed.ready();
    wait_until(&h.store, |m| m.contains_key("0xabc")).await?;
    assert!(*pending.get());

    feed.finalized("0xb10c", Vec::new());
    handle.outcome().await;
    assert!(!*pending.get());
    assert_eq!(calls.get().len(), 1);
    assert_eq!(calls.get()[0].status, ExtrinsicStatus::IsFinalized);
    Ok(())
}

#[tokio::test]
async fn interleaved_calls_are_tracked_independently() -> Result<()> {
    let h = harness();
    let first = MockCall::new(fixtures::transfer_call(), "0x01");
    let second = MockCall::new(fixtures::claim_call(), "0x02");
    let (f1, f2) = (first.feed(), second.feed());

    let h1 = h
        .executor
        .execute(&first, ALICE, h.client.clone(), h.signer.clone(), TxCallbacks::new())
        .await?;
    let h2 = h
        .executor
        .execute_unsigned(&second, h.client.clone(), TxCallbacks::new())
        .await?;

    f2.ready();
    f1.ready();
    f1.dispatch_error("0xb1", fixtures::insufficient_balance());
    f2.in_block("0xb1");
    f2.finalized("0xb1", Vec::new());

    assert!(matches!(h1.outcome().await, ExtrinsicOutcome::Failed { .. }));
    assert!(h2.outcome().await.is_finalized());

    let snapshot = h.store.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot["0x01"].status, ExtrinsicStatus::Error);
    assert_eq!(snapshot["0x02"].status, ExtrinsicStatus::IsFinalized);
    assert_eq!(snapshot["0x02"].block_hash.as_deref(), Some("0xb1"));
    Ok(())
}
