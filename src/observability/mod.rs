//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! every request
//!     → middleware.rs (timer, trace context, finalization hook)
//!         → metrics.rs (counters + histogram in an explicit registry)
//!         → trace.rs (trace ids, child spans)
//!         → logging.rs (structured events to the installed subscriber)
//!
//! Consumers:
//!     → /metrics endpoint (Prometheus scrape)
//!     → log aggregation (JSON on stdout, tailed by a shipping agent)
//! ```
//!
//! # Design Decisions
//! - Registry and trace context are explicit values, never globals
//! - Every log line for a request carries its trace id
//! - Metric updates are atomic; no locking around request accounting

pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod trace;

pub use metrics::HttpMetrics;
pub use trace::{TraceContext, TRACE_ID_HEADER};
