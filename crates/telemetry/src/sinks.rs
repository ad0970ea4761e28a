// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured extrinsic metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn extrinsic_metrics() -> &'static dyn ExtrinsicMetricsSink {
    SINK.get().map_or(&NOP_SINK as _, |s| s.as_extrinsic())
}

/// Returns a static reference to the configured connection metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn connection_metrics() -> &'static dyn ConnectionMetricsSink {
    SINK.get().map_or(&NOP_SINK as _, |s| s.as_connection())
}

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().map_or(&NOP_SINK as _, |s| s.as_error())
}

// --- Trait Definitions ---

/// A sink for metrics related to submitted extrinsics.
pub trait ExtrinsicMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of calls handed to the client, labeled `signed` or `unsigned`.
    fn inc_submitted(&self, kind: &'static str);
    /// Increments the counter of records created on the ready transition.
    fn inc_records_created(&self);
    /// Increments the counter of terminal transitions, labeled by final status.
    fn inc_terminal(&self, status: &'static str);
    /// Observes the time from the ready transition to a terminal one.
    fn observe_lifecycle_duration(&self, duration_secs: f64);
}
impl ExtrinsicMetricsSink for NopSink {
    fn inc_submitted(&self, _kind: &'static str) {}
    fn inc_records_created(&self) {}
    fn inc_terminal(&self, _status: &'static str) {}
    fn observe_lifecycle_duration(&self, _duration_secs: f64) {}
}

/// A sink for metrics related to chain connections and the signing extension.
pub trait ConnectionMetricsSink: Send + Sync + std::fmt::Debug {
    /// Sets a gauge vector to indicate the current API status of a chain.
    fn set_api_status(&self, chain_id: &str, status: &str);
    /// Increments a counter for `activate` calls, labeled by resulting extension status.
    fn inc_extension_activation(&self, outcome: &'static str);
}
impl ConnectionMetricsSink for NopSink {
    fn set_api_status(&self, _chain_id: &str, _status: &str) {}
    fn inc_extension_activation(&self, _outcome: &'static str) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: ExtrinsicMetricsSink + ConnectionMetricsSink + ErrorMetricsSink {
    /// Views the sink as an [`ExtrinsicMetricsSink`].
    fn as_extrinsic(&self) -> &dyn ExtrinsicMetricsSink;
    /// Views the sink as a [`ConnectionMetricsSink`].
    fn as_connection(&self) -> &dyn ConnectionMetricsSink;
    /// Views the sink as an [`ErrorMetricsSink`].
    fn as_error(&self) -> &dyn ErrorMetricsSink;
}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T
where
    T: ExtrinsicMetricsSink + ConnectionMetricsSink + ErrorMetricsSink,
{
    fn as_extrinsic(&self) -> &dyn ExtrinsicMetricsSink {
        self
    }
    fn as_connection(&self) -> &dyn ConnectionMetricsSink {
        self
    }
    fn as_error(&self) -> &dyn ErrorMetricsSink {
        self
    }
}
