// Path: crates/client/src/lib.rs
//! # Extrack Client Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Extrack Client
//!
//! Tracks submitted extrinsics from the moment the node accepts them into its
//! pool until they are finalized or fail, and manages the per-chain client
//! connections and extension accounts the executor needs.

pub mod decode;
pub mod executor;
pub mod provider;
pub mod store;
pub mod views;

// Re-export for convenience
pub use executor::{Executor, ExtrinsicHandle, ExtrinsicOutcome, TxCallbacks};
pub use provider::{ConnectionProvider, ConnectionState, MountHandle, ProviderState};
pub use store::{ExtrinsicStore, ExtrinsicUpdater, Extrinsics};
pub use views::{CallSignature, ExtrinsicCalls, ExtrinsicsView, PendingExtrinsic};
