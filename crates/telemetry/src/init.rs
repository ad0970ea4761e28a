// Path: crates/telemetry/src/init.rs
use extrack_types::config::TelemetryConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Initializes the global `tracing` subscriber for structured JSON logging.
pub fn init_tracing() -> Result<(), anyhow::Error> {
    init_tracing_with(&TelemetryConfig::default())
}

/// Initializes the global `tracing` subscriber from a [`TelemetryConfig`].
///
/// `RUST_LOG` takes precedence over `config.default_filter`. Records emitted through
/// the `log` facade are forwarded into `tracing`.
pub fn init_tracing_with(config: &TelemetryConfig) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_log::LogTracer::init()?;
    if config.json_logs {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339());
        tracing::subscriber::set_global_default(Registry::default().with(filter).with(fmt_layer))?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339());
        tracing::subscriber::set_global_default(Registry::default().with(filter).with(fmt_layer))?;
    }
    Ok(())
}
