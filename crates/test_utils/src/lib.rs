// Path: crates/test_utils/src/lib.rs
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

//! # Extrack Test Utilities
//!
//! In-process stand-ins for the node client, prepared calls, the signing
//! extension and the connector, for exercising the tracker without a node.

pub mod chain;
pub mod extension;
pub mod extrinsic;
pub mod fixtures;

pub use chain::{MockChainClient, MockConnector, MockRegistry};
pub use extension::{MockExtension, MockSigner};
pub use extrinsic::{MockCall, StatusFeed};
