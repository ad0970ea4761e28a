// Path: crates/client/src/store.rs

//! The transaction record store.
//!
//! Snapshots are immutable: every write produces a new `Arc`, and an update that
//! targets an unknown hash hands back the very same snapshot. Observers can
//! therefore detect change with `Arc::ptr_eq` alone.

use crate::views::ExtrinsicsView;
use extrack_types::app::{ExtrinsicStatus, TransactionRecord, TxHash};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::watch;

/// An immutable snapshot of every tracked record, keyed by canonical hash.
///
/// Records are shared between snapshots until one of them is written.
pub type Extrinsics = Arc<BTreeMap<TxHash, Arc<TransactionRecord>>>;

/// An empty snapshot.
pub fn empty() -> Extrinsics {
    Arc::new(BTreeMap::new())
}

/// Inserts or overwrites the full record at `hash`.
pub fn put_transaction_data(map: &Extrinsics, hash: &str, record: TransactionRecord) -> Extrinsics {
    let mut next = BTreeMap::clone(map);
    next.insert(hash.to_string(), Arc::new(record));
    Arc::new(next)
}

/// Replaces the status of the record at `hash`. Returns `map` itself if absent.
pub fn put_transaction_status(map: &Extrinsics, hash: &str, status: ExtrinsicStatus) -> Extrinsics {
    update_existing(map, hash, |rec| rec.status = status)
}

/// Marks the record at `hash` as failed with `message`. Returns `map` itself if absent.
pub fn put_transaction_error(map: &Extrinsics, hash: &str, message: &str) -> Extrinsics {
    update_existing(map, hash, |rec| {
        rec.status = ExtrinsicStatus::Error;
        rec.dispatch_error = Some(message.to_string());
    })
}

/// Marks the record at `hash` as included in `block_hash`. Returns `map` itself if absent.
pub fn put_block_hash(map: &Extrinsics, hash: &str, block_hash: &str) -> Extrinsics {
    update_existing(map, hash, |rec| {
        rec.status = ExtrinsicStatus::IsInBlock;
        rec.block_hash = Some(block_hash.to_string());
    })
}

fn update_existing(
    map: &Extrinsics,
    hash: &str,
    apply: impl FnOnce(&mut TransactionRecord),
) -> Extrinsics {
    if !map.contains_key(hash) {
        return Arc::clone(map);
    }
    let mut next = BTreeMap::clone(map);
    if let Some(rec) = next.get_mut(hash) {
        // Copies the record only; other snapshots keep the old one.
        apply(Arc::make_mut(rec));
    }
    Arc::new(next)
}

/// The write side of the store, as injected into an [`crate::Executor`].
pub trait ExtrinsicUpdater: Send + Sync + Debug {
    /// Records a call that just entered the ready pool.
    fn add_extrinsic(&self, hash: &str, record: TransactionRecord);
    /// Records block inclusion.
    fn add_block_hash(&self, hash: &str, block_hash: &str);
    /// Records a status change.
    fn update_extrinsic_status(&self, hash: &str, status: ExtrinsicStatus);
    /// Records a dispatch failure.
    fn update_extrinsic_error(&self, hash: &str, message: &str);
}

/// The shared record store. Publishes each new snapshot to its observers.
#[derive(Debug)]
pub struct ExtrinsicStore {
    snapshots: watch::Sender<Extrinsics>,
}

impl Default for ExtrinsicStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtrinsicStore {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(empty());
        Self { snapshots }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Extrinsics {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Extrinsics> {
        self.snapshots.subscribe()
    }

    /// A read-only view over this store.
    pub fn view(&self) -> ExtrinsicsView {
        ExtrinsicsView::new(self.subscribe())
    }

    /// Applies a pure update and publishes the result if it is a new snapshot.
    /// The replace happens under the channel's lock, so concurrent writers never lose updates.
    fn apply(&self, update: impl FnOnce(&Extrinsics) -> Extrinsics) -> bool {
        self.snapshots.send_if_modified(|current| {
            let next = update(current);
            if Arc::ptr_eq(current, &next) {
                return false;
            }
            *current = next;
            true
        })
    }
}

impl ExtrinsicUpdater for ExtrinsicStore {
    fn add_extrinsic(&self, hash: &str, record: TransactionRecord) {
        self.apply(|map| put_transaction_data(map, hash, record));
    }

    fn add_block_hash(&self, hash: &str, block_hash: &str) {
        if !self.apply(|map| put_block_hash(map, hash, block_hash)) {
            tracing::debug!(target: "store", %hash, "block hash for untracked extrinsic ignored");
        }
    }

    fn update_extrinsic_status(&self, hash: &str, status: ExtrinsicStatus) {
        if !self.apply(|map| put_transaction_status(map, hash, status)) {
            tracing::debug!(target: "store", %hash, %status, "status for untracked extrinsic ignored");
        }
    }

    fn update_extrinsic_error(&self, hash: &str, message: &str) {
        if !self.apply(|map| put_transaction_error(map, hash, message)) {
            tracing::debug!(target: "store", %hash, "error for untracked extrinsic ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrack_types::app::CallSummary;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(hash: &str, ts: u64) -> TransactionRecord {
        TransactionRecord::ready(
            hash.to_string(),
            CallSummary {
                method: "transfer".into(),
                section: "balances".into(),
                args: json!(["5F", 10]),
            },
            "5F",
            true,
            ts,
        )
    }

    #[derive(Debug, Clone)]
    enum Op {
        Status(ExtrinsicStatus),
        Error(String),
        Block(String),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            prop_oneof![
                Just(ExtrinsicStatus::IsReady),
                Just(ExtrinsicStatus::IsInBlock),
                Just(ExtrinsicStatus::IsFinalized),
                Just(ExtrinsicStatus::Error),
            ]
            .prop_map(Op::Status),
            "[a-z ]{0,16}".prop_map(Op::Error),
            "0x[0-9a-f]{8}".prop_map(Op::Block),
        ]
    }

    fn apply_op(map: &Extrinsics, hash: &str, op: &Op) -> Extrinsics {
        match op {
            Op::Status(s) => put_transaction_status(map, hash, *s),
            Op::Error(m) => put_transaction_error(map, hash, m),
            Op::Block(b) => put_block_hash(map, hash, b),
        }
    }

    proptest! {
        #[test]
        fn updates_to_absent_hash_are_noops(ops in proptest::collection::vec(op_strategy(), 0..12)) {
            let start = put_transaction_data(&empty(), "0xaaa", record("0xaaa", 1));
            let mut map = start.clone();
            for op in &ops {
                map = apply_op(&map, "0xbbb", op);
            }
            prop_assert!(Arc::ptr_eq(&start, &map));
        }

        #[test]
        fn error_always_sets_error_status(msg in "[A-Za-z.: ]{1,40}", prior in proptest::collection::vec(op_strategy(), 0..6)) {
            let mut map = put_transaction_data(&empty(), "0xaaa", record("0xaaa", 1));
            for op in &prior {
                map = apply_op(&map, "0xaaa", op);
            }
            map = put_transaction_error(&map, "0xaaa", &msg);
            let rec = &map["0xaaa"];
            prop_assert_eq!(rec.status, ExtrinsicStatus::Error);
            prop_assert_eq!(rec.dispatch_error.as_deref(), Some(msg.as_str()));
        }
    }

    #[test]
    fn put_data_stores_record_field_for_field() {
        let rec = record("0xabc", 7);
        let map = put_transaction_data(&empty(), "0xabc", rec.clone());
        assert_eq!(*map["0xabc"], rec);
    }

    #[test]
    fn status_update_is_idempotent() {
        let map = put_transaction_data(&empty(), "0xabc", record("0xabc", 7));
        let once = put_transaction_status(&map, "0xabc", ExtrinsicStatus::IsFinalized);
        let twice = put_transaction_status(&once, "0xabc", ExtrinsicStatus::IsFinalized);
        assert_eq!(once, twice);
        assert!(!Arc::ptr_eq(&once, &twice));
    }

    #[test]
    fn updates_never_touch_previous_snapshot() {
        let before = put_transaction_data(&empty(), "0xabc", record("0xabc", 7));
        let after = put_block_hash(&before, "0xabc", "0xb10c");
        assert_eq!(before["0xabc"].status, ExtrinsicStatus::IsReady);
        assert!(before["0xabc"].block_hash.is_none());
        assert_eq!(after["0xabc"].status, ExtrinsicStatus::IsInBlock);
        assert_eq!(after["0xabc"].block_hash.as_deref(), Some("0xb10c"));
    }

    #[test]
    fn untouched_records_are_shared() {
        let map = put_transaction_data(&empty(), "0x01", record("0x01", 1));
        let map = put_transaction_data(&map, "0x02", record("0x02", 2));
        let next = put_transaction_status(&map, "0x02", ExtrinsicStatus::IsFinalized);
        assert!(Arc::ptr_eq(&map["0x01"], &next["0x01"]));
        assert!(!Arc::ptr_eq(&map["0x02"], &next["0x02"]));
    }

    #[tokio::test]
    async fn store_publishes_only_real_changes() {
        let store = ExtrinsicStore::new();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.update_extrinsic_status("0xnope", ExtrinsicStatus::IsFinalized);
        assert!(!rx.has_changed().unwrap());

        store.add_extrinsic("0xabc", record("0xabc", 1));
        assert!(rx.has_changed().unwrap());
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.len(), 1);

        store.update_extrinsic_error("0xabc", "balances.InsufficientBalance: Balance too low to send value.");
        assert!(rx.has_changed().unwrap());
        assert_eq!(store.snapshot()["0xabc"].status, ExtrinsicStatus::Error);
        // The earlier snapshot is unchanged.
        assert_eq!(snap["0xabc"].status, ExtrinsicStatus::IsReady);
    }
}
