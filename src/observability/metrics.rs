//! Request metrics collection and exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, route, status code
//! - `http_request_duration_seconds` (histogram): latency distribution
//! - `http_request_errors_total` (counter): responses with status >= 400
//!
//! # Design Decisions
//! - The registry is owned by [`HttpMetrics`] and constructed explicitly at
//!   startup; nothing registers into a process-global default. Tests build
//!   their own instance and observe it in isolation.
//! - Label cardinality is bounded: route labels come from the declared route
//!   templates, never from raw request paths.
//! - Reading the exposition never mutates instrument state.

use std::sync::Arc;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Histogram buckets in seconds, covering the latency range the fault
/// injector produces.
const DURATION_BUCKETS: &[f64] = &[0.1, 0.3, 0.5, 1.0, 2.0, 5.0, 10.0];

const LABELS: &[&str] = &["method", "route", "status_code"];

/// Shared handle over the request instruments.
///
/// Cloning is cheap; all clones update the same underlying registry.
#[derive(Clone)]
pub struct HttpMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    request_errors_total: IntCounterVec,
}

impl HttpMetrics {
    /// Build a fresh registry with the request instruments registered.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "http_requests_total",
                "Total number of HTTP requests received",
            ),
            LABELS,
        )?;
        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "Histogram of response times in seconds",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            LABELS,
        )?;
        let request_errors_total = IntCounterVec::new(
            Opts::new(
                "http_request_errors_total",
                "Total number of failed HTTP requests",
            ),
            LABELS,
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(request_errors_total.clone()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                requests_total,
                request_duration_seconds,
                request_errors_total,
            }),
        })
    }

    /// Build a registry that also exports process-level metrics (CPU time,
    /// memory, open fds, start time). Linux only, where the collector can
    /// read procfs.
    #[cfg(target_os = "linux")]
    pub fn with_process_metrics() -> Result<Self, prometheus::Error> {
        let metrics = Self::new()?;
        metrics.inner.registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;
        Ok(metrics)
    }

    /// Record a finished request.
    ///
    /// Updates the request counter and duration histogram, plus the error
    /// counter when the status code is an error class (>= 400).
    pub fn observe_request(&self, method: &str, route: &str, status: u16, seconds: f64) {
        let code = status.to_string();
        let labels = [method, route, code.as_str()];

        self.inner.requests_total.with_label_values(&labels).inc();
        self.inner
            .request_duration_seconds
            .with_label_values(&labels)
            .observe(seconds);

        if status >= 400 {
            self.inner
                .request_errors_total
                .with_label_values(&labels)
                .inc();
        }
    }

    /// Render the full registry in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.inner.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| prometheus::Error::Msg(err.to_string()))
    }

    /// MIME type of the exposition output.
    pub fn format_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
