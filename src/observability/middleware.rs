//! Request tracking middleware.
//!
//! Wraps every route: resolves the trace context, logs arrival, and once the
//! response is produced records metrics and the completion log. Finalization
//! runs exactly once per request because it is driven by the response flowing
//! back through this middleware, not by handler control flow; a catch-panic
//! boundary layered beneath converts panicking handlers into 500 responses
//! that still pass through here.

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

use crate::observability::metrics::HttpMetrics;
use crate::observability::trace::{TraceContext, TRACE_ID_HEADER};

/// Route label used when no declared route matched the request.
///
/// Raw request paths are unbounded and must never become label values.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Middleware entry point, installed with `middleware::from_fn_with_state`.
pub async fn track_requests(
    State(metrics): State<HttpMetrics>,
    mut request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let trace = TraceContext::from_headers(request.headers());
    tracing::info!(
        method = %method,
        path = %path,
        trace_id = %trace.trace_id(),
        "incoming request"
    );
    request.extensions_mut().insert(trace.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(trace.trace_id()) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }

    record_completion(
        &metrics,
        trace.trace_id(),
        &method,
        &route,
        response.status().as_u16(),
        started.elapsed(),
    );

    response
}

/// Record a finished request into the instruments and the log stream.
///
/// Kept free of framework types so finalization behavior is testable against
/// a plain [`HttpMetrics`] without standing up a server.
pub fn record_completion(
    metrics: &HttpMetrics,
    trace_id: &str,
    method: &str,
    route: &str,
    status: u16,
    elapsed: Duration,
) {
    let seconds = elapsed.as_secs_f64();
    metrics.observe_request(method, route, status, seconds);

    if status >= 400 {
        tracing::error!(
            method = %method,
            route = %route,
            status,
            seconds,
            trace_id = %trace_id,
            "request failed"
        );
    } else {
        tracing::info!(
            method = %method,
            route = %route,
            status,
            seconds,
            trace_id = %trace_id,
            "request completed"
        );
    }
}
