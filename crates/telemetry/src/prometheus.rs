// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_gauge_vec, register_histogram, register_int_counter,
    register_int_counter_vec, GaugeVec, Histogram, IntCounter, IntCounterVec,
};

// --- Metric Statics ---
// Collectors are initialized exactly once by `install`.

static EXTRINSICS_SUBMITTED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static EXTRINSIC_RECORDS_CREATED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static EXTRINSICS_TERMINAL_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static EXTRINSIC_LIFECYCLE_SECONDS: OnceCell<Histogram> = OnceCell::new();
static CHAIN_API_STATUS: OnceCell<GaugeVec> = OnceCell::new();
static EXTENSION_ACTIVATIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

const API_STATUSES: [&str; 3] = ["initializing", "connected", "failed"];

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Records into a collector if `install()` has run; otherwise the observation is dropped.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

impl ExtrinsicMetricsSink for PrometheusSink {
    fn inc_submitted(&self, kind: &'static str) {
        with_metric!(EXTRINSICS_SUBMITTED_TOTAL, |m| m.with_label_values(&[kind]).inc());
    }
    fn inc_records_created(&self) {
        with_metric!(EXTRINSIC_RECORDS_CREATED_TOTAL, |m| m.inc());
    }
    fn inc_terminal(&self, status: &'static str) {
        with_metric!(EXTRINSICS_TERMINAL_TOTAL, |m| m
            .with_label_values(&[status])
            .inc());
    }
    fn observe_lifecycle_duration(&self, duration_secs: f64) {
        with_metric!(EXTRINSIC_LIFECYCLE_SECONDS, |m| m.observe(duration_secs));
    }
}

impl ConnectionMetricsSink for PrometheusSink {
    fn set_api_status(&self, chain_id: &str, status: &str) {
        with_metric!(CHAIN_API_STATUS, |m| {
            for candidate in API_STATUSES {
                m.with_label_values(&[chain_id, candidate])
                    .set(if candidate == status { 1.0 } else { 0.0 });
            }
        });
    }
    fn inc_extension_activation(&self, outcome: &'static str) {
        with_metric!(EXTENSION_ACTIVATIONS_TOTAL, |m| m
            .with_label_values(&[outcome])
            .inc());
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, variant]).inc());
    }
}

/// Initializes all Prometheus metrics collectors and returns a static reference to the sink.
/// This function must be called only once at application startup.
#[allow(clippy::expect_used)]
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    EXTRINSICS_SUBMITTED_TOTAL
        .set(register_int_counter_vec!(
            "extrack_extrinsics_submitted_total",
            "Total extrinsics handed to the chain client.",
            &["kind"]
        )?)
        .expect("static already initialized");
    EXTRINSIC_RECORDS_CREATED_TOTAL
        .set(register_int_counter!(
            "extrack_extrinsic_records_created_total",
            "Total transaction records created on the ready transition."
        )?)
        .expect("static already initialized");
    EXTRINSICS_TERMINAL_TOTAL
        .set(register_int_counter_vec!(
            "extrack_extrinsics_terminal_total",
            "Total extrinsics that reached a terminal status.",
            &["status"]
        )?)
        .expect("static already initialized");
    EXTRINSIC_LIFECYCLE_SECONDS
        .set(register_histogram!(
            "extrack_extrinsic_lifecycle_seconds",
            "Time from the ready transition to a terminal status.",
            exponential_buckets(0.5, 2.0, 10)?
        )?)
        .expect("static already initialized");
    CHAIN_API_STATUS
        .set(register_gauge_vec!(
            "extrack_chain_api_status",
            "Current API status of each chain (1 if active, 0 otherwise).",
            &["chain", "status"]
        )?)
        .expect("static already initialized");
    EXTENSION_ACTIVATIONS_TOTAL
        .set(register_int_counter_vec!(
            "extrack_extension_activations_total",
            "Total extension activations, labeled by resulting status.",
            &["outcome"]
        )?)
        .expect("static already initialized");
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "extrack_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?)
        .expect("static already initialized");

    static SINK: PrometheusSink = PrometheusSink;
    Ok(&SINK)
}

/// Installs the Prometheus sink and makes it the process-wide sink returned by
/// [`extrinsic_metrics`], [`connection_metrics`] and [`error_metrics`].
///
/// Call once at startup. Fails if the collectors or the global sink were already set.
pub fn install_global() -> Result<&'static dyn MetricsSink, anyhow::Error> {
    let sink = install()?;
    SINK.set(sink)
        .map_err(|_| anyhow::anyhow!("global metrics sink already set"))?;
    Ok(sink)
}
