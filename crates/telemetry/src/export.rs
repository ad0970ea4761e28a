// Path: crates/telemetry/src/export.rs
use prometheus::{Encoder, TextEncoder};

/// Renders every registered metric in the Prometheus text exposition format.
///
/// The tracker has no server role; embedders serve this from their own endpoint.
pub fn encode_metrics() -> Result<String, anyhow::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buf = Vec::with_capacity(64 * 1024);
    encoder.encode(&metric_families, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// The content type to serve [`encode_metrics`] output with.
pub fn content_type() -> String {
    TextEncoder::new().format_type().to_string()
}
