// Path: crates/client/src/views.rs
//! Read-only, memoized views over the record store.

use crate::store::Extrinsics;
use extrack_types::app::TransactionRecord;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

/// Identifies a family of calls: one method of one pallet, sent by one account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallSignature {
    pub method: String,
    pub section: String,
    /// Empty for unsigned calls.
    pub sender: String,
}

impl CallSignature {
    pub fn new(method: &str, section: &str, sender: &str) -> Self {
        Self {
            method: method.to_string(),
            section: section.to_string(),
            sender: sender.to_string(),
        }
    }

    fn matches(&self, record: &TransactionRecord) -> bool {
        record.matches(&self.method, &self.section, &self.sender)
    }
}

/// The earliest-created matching record that has not reached a terminal status.
pub fn oldest_pending(map: &Extrinsics, signature: &CallSignature) -> Option<Arc<TransactionRecord>> {
    let mut matching: Vec<&Arc<TransactionRecord>> =
        map.values().filter(|rec| signature.matches(rec)).collect();
    matching.sort_by_key(|rec| rec.timestamp);
    matching
        .into_iter()
        .find(|rec| rec.status.is_pending())
        .cloned()
}

/// Whether any record matching `signature` is still in flight.
pub fn is_pending_extrinsic(map: &Extrinsics, signature: &CallSignature) -> bool {
    oldest_pending(map, signature).is_some()
}

/// Copies of every record matching `signature`, in store order.
pub fn matching_calls(map: &Extrinsics, signature: &CallSignature) -> Vec<TransactionRecord> {
    map.values()
        .filter(|rec| signature.matches(rec))
        .map(|rec| TransactionRecord::clone(rec))
        .collect()
}

/// A value derived from the store for one call signature.
///
/// The value is recomputed lazily, and only when the store published a different
/// snapshot than the one it was computed from.
pub struct Derived<T> {
    snapshots: watch::Receiver<Extrinsics>,
    signature: CallSignature,
    compute: fn(&Extrinsics, &CallSignature) -> T,
    source: Extrinsics,
    value: T,
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("signature", &self.signature)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T> Derived<T> {
    fn new(
        snapshots: watch::Receiver<Extrinsics>,
        signature: CallSignature,
        compute: fn(&Extrinsics, &CallSignature) -> T,
    ) -> Self {
        let source = snapshots.borrow().clone();
        let value = compute(&source, &signature);
        Self {
            snapshots,
            signature,
            compute,
            source,
            value,
        }
    }

    /// The value for the current snapshot.
    pub fn get(&mut self) -> &T {
        let current = self.snapshots.borrow_and_update().clone();
        if !Arc::ptr_eq(&current, &self.source) {
            self.value = (self.compute)(&current, &self.signature);
            self.source = current;
        }
        &self.value
    }

    /// Whether the store moved on since the value was last computed.
    pub fn is_stale(&self) -> bool {
        !Arc::ptr_eq(&*self.snapshots.borrow(), &self.source)
    }

    /// Waits until the store publishes a new snapshot. `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.snapshots.changed().await.is_ok()
    }

    pub fn signature(&self) -> &CallSignature {
        &self.signature
    }
}

/// Whether a call with a given signature is in flight.
pub type PendingExtrinsic = Derived<bool>;
/// Every tracked call with a given signature.
pub type ExtrinsicCalls = Derived<Vec<TransactionRecord>>;

/// Read access to the store for UI-side observers.
#[derive(Debug, Clone)]
pub struct ExtrinsicsView {
    snapshots: watch::Receiver<Extrinsics>,
}

impl ExtrinsicsView {
    pub fn new(snapshots: watch::Receiver<Extrinsics>) -> Self {
        Self { snapshots }
    }

    /// The current full snapshot.
    pub fn extrinsics(&self) -> Extrinsics {
        self.snapshots.borrow().clone()
    }

    /// Waits for the next published snapshot. `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.snapshots.changed().await.is_ok()
    }

    pub fn pending_extrinsic(&self, method: &str, section: &str, sender: &str) -> PendingExtrinsic {
        Derived::new(
            self.snapshots.clone(),
            CallSignature::new(method, section, sender),
            is_pending_extrinsic,
        )
    }

    pub fn extrinsic_calls(&self, method: &str, section: &str, sender: &str) -> ExtrinsicCalls {
        Derived::new(
            self.snapshots.clone(),
            CallSignature::new(method, section, sender),
            matching_calls,
        )
    }
}
