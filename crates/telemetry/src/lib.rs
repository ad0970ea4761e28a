// Path: crates/telemetry/src/lib.rs
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

//! # Extrack Telemetry
//!
//! Structured logging initialization, abstract metrics sinks that decouple the
//! executor and provider from a metrics backend, and a Prometheus implementation
//! of those sinks.

/// Text exposition of the registered Prometheus metrics.
pub mod export;
/// The initialization routine for global structured logging.
pub mod init;
/// The concrete implementation of metrics sinks using the `prometheus` crate.
pub mod prometheus;
/// Abstract traits (`*MetricsSink`) that define the contract for metrics reporting.
pub mod sinks;
/// A simple RAII timer for measuring an extrinsic's lifecycle.
pub mod time;

// Re-export the public helper functions for easy access to the global sinks.
pub use sinks::{connection_metrics, error_metrics, extrinsic_metrics};
