//! Stub downstream service.
//!
//! Always answers immediately with a fixed body. Exists so the main
//! service's /problem endpoint has a real network dependency to call.

use std::net::SocketAddr;

use axum::{routing::get, Router};
use clap::Parser;
use tokio::net::TcpListener;

const EXTERNAL_RESPONSE: &str = "Response from slow external service";

#[derive(Parser)]
#[command(name = "external-service")]
#[command(about = "Stub downstream dependency for the demo service", long_about = None)]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    listen: SocketAddr,
}

async fn external_service() -> &'static str {
    tracing::info!("external service responding");
    EXTERNAL_RESPONSE
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let app = Router::new().route("/external-service", get(external_service));

    let listener = TcpListener::bind(cli.listen).await?;
    tracing::info!(address = %listener.local_addr()?, "external service running");

    axum::serve(listener, app).await?;
    Ok(())
}
