// Path: crates/types/src/lib.rs
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

//! # Extrack Types
//!
//! Shared data structures for the extrinsic tracker: transaction records and
//! their lifecycle status, chain connection state, dispatch errors, the static
//! network table and provider configuration, and the error taxonomy.

/// Transaction records, statuses, accounts and dispatch errors.
pub mod app;
/// Network table, provider and telemetry configuration.
pub mod config;
/// Error types with stable machine-readable codes.
pub mod error;
