use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use observability_demo::config::loader;
use observability_demo::observability::logging::init_telemetry;
use observability_demo::{HttpMetrics, HttpServer, Shutdown};

/// Demonstration HTTP service with request metrics, correlated logs, and
/// trace propagation.
#[derive(Parser)]
#[command(name = "observability-demo", version)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = loader::load_or_default(cli.config.as_deref())?;

    // Observability is never a hard dependency for serving traffic.
    if let Err(err) = init_telemetry(&config.telemetry) {
        eprintln!("continuing without structured logging: {err}");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        downstream_url = %config.downstream.url,
        failure_rate = config.fault.failure_rate,
        request_timeout_secs = config.timeouts.request_secs,
        "configuration loaded"
    );

    #[cfg(target_os = "linux")]
    let metrics = HttpMetrics::with_process_metrics()?;
    #[cfg(not(target_os = "linux"))]
    let metrics = HttpMetrics::new()?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    shutdown.listen_for_ctrl_c();

    let server = HttpServer::new(config, metrics)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
