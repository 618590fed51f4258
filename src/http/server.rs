//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the demonstration endpoints
//! - Wire up the middleware stack (tracking, panic boundary, timeout)
//! - Serve with graceful shutdown
//!
//! The tracking middleware is the outermost application layer, so every
//! request produces exactly one finalization event no matter how its handler
//! ends; the catch-panic boundary beneath it turns panics into 500 responses
//! that still flow through finalization.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::downstream::DownstreamClient;
use crate::fault::FaultInjector;
use crate::http::handlers;
use crate::observability::metrics::HttpMetrics;
use crate::observability::middleware::track_requests;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub metrics: HttpMetrics,
    pub fault: Arc<FaultInjector>,
    pub downstream: Arc<DownstreamClient>,
}

/// HTTP server for the demonstration service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server from validated configuration and an explicitly
    /// constructed metrics registry.
    pub fn new(config: ServiceConfig, metrics: HttpMetrics) -> Result<Self, reqwest::Error> {
        let downstream = Arc::new(DownstreamClient::new(&config.downstream)?);
        let fault = Arc::new(FaultInjector::new(&config.fault));

        let state = AppState {
            metrics,
            fault,
            downstream,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let metrics = state.metrics.clone();

        Router::new()
            .route("/", get(handlers::home))
            .route("/slow", get(handlers::slow))
            .route("/problem", get(handlers::problem))
            .route("/metrics", get(handlers::metrics))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn_with_state(metrics, track_requests))
                    .layer(CatchPanicLayer::new())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
