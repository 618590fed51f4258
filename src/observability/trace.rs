//! Trace correlation primitives.
//!
//! A [`TraceContext`] correlates everything a single request touches: its log
//! lines, any child spans it opens, and the `x-trace-id` header on the
//! response. The context is established once by the tracking middleware and
//! passed down explicitly through request extensions; nothing reads an
//! ambient "currently active" span.

use std::time::Instant;

use axum::http::HeaderMap;
use uuid::Uuid;

/// Header carrying the trace identifier on requests and responses.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Correlation context for a single request.
#[derive(Debug, Clone)]
pub struct TraceContext {
    trace_id: String,
    span_id: String,
}

impl TraceContext {
    /// Mint a fresh context with new trace and span identifiers.
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4().simple().to_string(),
            span_id: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Resolve the context for an inbound request.
    ///
    /// A non-empty `x-trace-id` header is honored so correlation can span
    /// multiple services; otherwise a fresh trace id is generated.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(TRACE_ID_HEADER).and_then(|v| v.to_str().ok()) {
            Some(id) if !id.is_empty() => Self {
                trace_id: id.to_string(),
                span_id: Uuid::new_v4().simple().to_string(),
            },
            _ => Self::new(),
        }
    }

    /// The trace identifier shared by every span and log line of this request.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// The identifier of the request's root span.
    pub fn span_id(&self) -> &str {
        &self.span_id
    }

    /// Start a child span for a sub-operation.
    ///
    /// The returned guard ends the span when dropped, so every exit path out
    /// of the calling scope closes it.
    pub fn child(&self, operation: &'static str) -> TraceSpan {
        let span = TraceSpan {
            trace_id: self.trace_id.clone(),
            span_id: Uuid::new_v4().simple().to_string(),
            parent_span_id: self.span_id.clone(),
            operation,
            started: Instant::now(),
        };
        tracing::debug!(
            trace_id = %span.trace_id,
            span_id = %span.span_id,
            parent_span_id = %span.parent_span_id,
            operation,
            "span started"
        );
        span
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A child span tied to a [`TraceContext`].
///
/// Ends on drop. Failures are recorded onto the span with
/// [`TraceSpan::record_error`] without ending it.
#[derive(Debug)]
pub struct TraceSpan {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    operation: &'static str,
    started: Instant,
}

impl TraceSpan {
    /// Record a failure on this span.
    pub fn record_error(&self, error: &dyn std::error::Error) {
        tracing::error!(
            trace_id = %self.trace_id,
            span_id = %self.span_id,
            operation = self.operation,
            error = %error,
            "span recorded exception"
        );
    }
}

impl Drop for TraceSpan {
    fn drop(&mut self) {
        tracing::debug!(
            trace_id = %self.trace_id,
            span_id = %self.span_id,
            operation = self.operation,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "span ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn fresh_contexts_are_distinct_and_non_empty() {
        let a = TraceContext::new();
        let b = TraceContext::new();
        assert!(!a.trace_id().is_empty());
        assert_ne!(a.trace_id(), b.trace_id());
        assert_ne!(a.span_id(), b.span_id());
    }

    #[test]
    fn inbound_header_is_honored() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACE_ID_HEADER, HeaderValue::from_static("upstream-trace"));

        let context = TraceContext::from_headers(&headers);
        assert_eq!(context.trace_id(), "upstream-trace");
    }

    #[test]
    fn empty_header_generates_a_fresh_id() {
        let mut headers = HeaderMap::new();
        headers.insert(TRACE_ID_HEADER, HeaderValue::from_static(""));

        let context = TraceContext::from_headers(&headers);
        assert!(!context.trace_id().is_empty());
    }

    #[test]
    fn child_span_shares_the_trace_id() {
        let context = TraceContext::new();
        let span = context.child("unit-test");
        assert_eq!(span.trace_id, context.trace_id());
        assert_eq!(span.parent_span_id, context.span_id());
        assert_ne!(span.span_id, context.span_id());
    }
}
