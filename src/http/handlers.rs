//! Route handlers for the demonstration endpoints.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};

use crate::downstream::DOWNSTREAM_ERROR_BODY;
use crate::http::server::AppState;
use crate::observability::trace::TraceContext;

/// Fixed body for the home route.
pub const WELCOME_BODY: &str = "Welcome";

/// `GET /`
pub async fn home() -> &'static str {
    WELCOME_BODY
}

/// `GET /metrics`
///
/// Serializes every registered instrument for the scrape client. Reading is
/// side-effect free; repeated scrapes with no intervening traffic return the
/// same counter values.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, state.metrics.format_type())],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to render metrics",
            )
                .into_response()
        }
    }
}

/// `GET /slow`
///
/// Runs the fault-injection simulator inside a child span. Failures map to a
/// 500 whose body is the simulated error's message.
pub async fn slow(
    State(state): State<AppState>,
    Extension(trace): Extension<TraceContext>,
) -> Response {
    let span = trace.child("slow-operation");
    tracing::info!(trace_id = %trace.trace_id(), "processing slow request");

    match state.fault.simulate().await {
        Ok(payload) => payload.into_response(),
        Err(err) => {
            span.record_error(&err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// `GET /problem`
///
/// Forwards the downstream body verbatim on success. Any transport failure
/// becomes a 500 with a fixed body; the cause stays in the span and logs.
pub async fn problem(
    State(state): State<AppState>,
    Extension(trace): Extension<TraceContext>,
) -> Response {
    match state.downstream.fetch(&trace).await {
        Ok(body) => body.into_response(),
        Err(err) => {
            tracing::error!(trace_id = %trace.trace_id(), error = %err, "downstream call failed");
            (StatusCode::INTERNAL_SERVER_ERROR, DOWNSTREAM_ERROR_BODY).into_response()
        }
    }
}
