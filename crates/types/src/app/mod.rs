// Path: crates/types/src/app/mod.rs
//! Application-level data structures shared by the executor, the store and the provider.

use std::time::{SystemTime, UNIX_EPOCH};

/// Connection and account discovery state.
pub mod connection;
/// Runtime dispatch errors as reported by a node.
pub mod dispatch;
/// Extrinsic records and their lifecycle status.
pub mod extrinsic;

pub use connection::*;
pub use dispatch::*;
pub use extrinsic::*;

/// A lower-cased, `0x`-prefixed hex transaction hash. Used as the store key.
pub type TxHash = String;

/// The identifier of a configured chain (e.g. `"picasso"`, `"kusama"`).
pub type ChainId = String;

/// Normalizes a hash as reported by a client library into the canonical store key.
pub fn normalize_hash(raw: &str) -> TxHash {
    raw.trim().to_ascii_lowercase()
}

/// Milliseconds since the Unix epoch. Clamps to zero if the clock is before the epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
