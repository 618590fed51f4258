//! Client for the demonstration downstream dependency.
//!
//! The /problem endpoint calls a separately running stub service through this
//! client. Calls run inside a child trace span and propagate the trace id on
//! the outbound request.

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::DownstreamConfig;
use crate::observability::trace::{TraceContext, TRACE_ID_HEADER};

/// Body returned to clients when the downstream call fails.
///
/// Deliberately generic: the underlying cause is recorded on the trace span
/// and in the logs, never surfaced to the caller.
pub const DOWNSTREAM_ERROR_BODY: &str = "External service error";

/// Failure talking to the downstream service.
#[derive(Debug, Error)]
pub enum DownstreamError {
    #[error("downstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the downstream stub service.
#[derive(Debug, Clone)]
pub struct DownstreamClient {
    client: reqwest::Client,
    url: String,
}

impl DownstreamClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: &DownstreamConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Call the downstream service within a child span of `trace`.
    ///
    /// Non-success statuses count as failures. Errors are recorded on the
    /// span before being returned.
    pub async fn fetch(&self, trace: &TraceContext) -> Result<String, DownstreamError> {
        let span = trace.child("downstream-call");
        tracing::info!(
            trace_id = %trace.trace_id(),
            url = %self.url,
            "calling external service"
        );

        let outcome: Result<String, reqwest::Error> = async {
            let response = self
                .client
                .get(&self.url)
                .header(TRACE_ID_HEADER, trace.trace_id())
                .send()
                .await?
                .error_for_status()?;
            response.text().await
        }
        .await;

        match outcome {
            Ok(body) => {
                tracing::info!(trace_id = %trace.trace_id(), "external service responded");
                Ok(body)
            }
            Err(err) => {
                span.record_error(&err);
                Err(DownstreamError::Transport(err))
            }
        }
    }
}
