//! Fault injection for the slow endpoint.
//!
//! The simulator waits a uniformly random time, then resolves to a fixed
//! payload or fails with one of a fixed set of errors. Randomness comes
//! through an injected `Rng`, so the outcome distribution is testable with a
//! seeded generator while production draws from the thread RNG.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use crate::config::schema::FaultConfig;

/// Payload returned when the simulated operation succeeds.
pub const SLOW_RESPONSE: &str = "Slow response";

/// Failure modes the simulator can produce.
///
/// The display strings are the exact bodies served to clients on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimulatedError {
    #[error("Server failed to respond")]
    NoResponse,
    #[error("Database connection lost")]
    DatabaseConnectionLost,
    #[error("Service unavailable")]
    ServiceUnavailable,
    #[error("Internal server error")]
    InternalServerError,
    #[error("Timeout error")]
    Timeout,
    #[error("Unexpected server error")]
    Unexpected,
}

impl SimulatedError {
    /// Every failure mode, in a fixed order.
    pub const ALL: [SimulatedError; 6] = [
        SimulatedError::NoResponse,
        SimulatedError::DatabaseConnectionLost,
        SimulatedError::ServiceUnavailable,
        SimulatedError::InternalServerError,
        SimulatedError::Timeout,
        SimulatedError::Unexpected,
    ];

    fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// One drawn outcome: how long to wait and what to return afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Outcome {
    pub delay: Duration,
    pub result: Result<&'static str, SimulatedError>,
}

/// Randomized slow-operation simulator.
#[derive(Debug, Clone)]
pub struct FaultInjector {
    max_delay: Duration,
    failure_rate: f64,
}

impl FaultInjector {
    pub fn new(config: &FaultConfig) -> Self {
        Self {
            max_delay: Duration::from_millis(config.max_delay_ms),
            failure_rate: config.failure_rate,
        }
    }

    /// Draw a delay and an outcome from the given generator.
    ///
    /// The delay is uniform over [0, max_delay); failures occur with the
    /// configured probability and pick uniformly among the failure modes.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        let delay = self.max_delay.mul_f64(rng.gen::<f64>());
        let result = if rng.gen::<f64>() < self.failure_rate {
            Err(SimulatedError::pick(rng))
        } else {
            Ok(SLOW_RESPONSE)
        };
        Outcome { delay, result }
    }

    /// Wait out a random delay, then resolve to the drawn outcome.
    pub async fn simulate(&self) -> Result<&'static str, SimulatedError> {
        let outcome = {
            let mut rng = rand::thread_rng();
            self.draw(&mut rng)
        };

        tokio::time::sleep(outcome.delay).await;

        let delay_ms = outcome.delay.as_millis() as u64;
        match outcome.result {
            Ok(payload) => {
                tracing::info!(delay_ms, "slow operation succeeded");
                Ok(payload)
            }
            Err(err) => {
                tracing::error!(delay_ms, error = %err, "slow operation failed");
                Err(err)
            }
        }
    }
}
