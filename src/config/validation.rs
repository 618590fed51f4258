//! Configuration validation.
//!
//! Serde handles syntactic checks; this module checks semantics. Validation
//! is a pure function and returns all problems found, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("fault.failure_rate {0} must be within [0.0, 1.0]")]
    FailureRateOutOfRange(f64),

    #[error("downstream.url '{0}' must start with http:// or https://")]
    InvalidDownstreamUrl(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("downstream.timeout_secs must be greater than zero")]
    ZeroDownstreamTimeout,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if !(0.0..=1.0).contains(&config.fault.failure_rate) {
        errors.push(ValidationError::FailureRateOutOfRange(
            config.fault.failure_rate,
        ));
    }

    if !config.downstream.url.starts_with("http://")
        && !config.downstream.url.starts_with("https://")
    {
        errors.push(ValidationError::InvalidDownstreamUrl(
            config.downstream.url.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.downstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDownstreamTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
