//! Logging subsystem initialization.
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` (the `RUST_LOG`
//! variable overrides the configured level) and either a human-readable or a
//! JSON fmt layer. The subscriber is the write-only sink every correlated
//! log line flows into; a shipping agent tails the JSON output.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::TelemetryConfig;

/// Failure to install the global tracing subscriber.
///
/// Callers treat this as non-fatal: the service keeps serving traffic
/// without structured logs rather than refusing to start.
#[derive(Debug, Error)]
#[error("failed to install tracing subscriber: {0}")]
pub struct TelemetryInitError(String);

/// Install the global subscriber according to the telemetry configuration.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|err| TelemetryInitError(err.to_string()))
}
