//! A demonstration web service wired for observability.
//!
//! Every request flows through a tracking middleware that measures duration,
//! counts outcomes in an explicit Prometheus registry, emits logs correlated
//! by trace id, and stamps the id on the response. Two endpoints exercise
//! the pipeline: a randomized slow/failing operation and a call to a stub
//! downstream service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ tracking middleware ──▶ handler (/, /slow, /problem, /metrics)
//!                │  start timer,            │
//!                │  resolve trace id        ├─▶ fault injector (random delay/outcome)
//!                │                          └─▶ downstream client ──▶ external-service
//!                │                                 (child span)          (stub binary)
//!                └──▶ finalization: counters + histogram + completion log
//!                     response carries x-trace-id
//! ```

// Core subsystems
pub mod config;
pub mod http;

// Demonstration workloads
pub mod downstream;
pub mod fault;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::HttpMetrics;
