// Path: crates/api/src/lib.rs
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

//! # Extrack API
//!
//! The seams between the tracker and its external collaborators. A node client
//! library, a signing extension and prepared calls are consumed only through
//! these traits; the tracker never speaks a wire protocol itself.

/// Chain client handles, connectors and the metadata registry.
pub mod chain;
/// Signing extension bridge and signers.
pub mod extension;
/// Submittable calls and their status subscriptions.
pub mod extrinsic;

pub use chain::{ChainClient, ChainConnector, MetaError, MetadataRegistry};
pub use extension::{ExtensionBridge, InjectedAccount, InjectedExtension, Signer};
pub use extrinsic::{SubmittableCall, Subscription, TxPoolStatus, TxUpdate};
