//! Bounded retry with fixed delay for message delivery.
//!
//! Only connectivity-class failures (`FailureKind::Transient`) are retried.
//! Anything else aborts immediately: authentication problems, rejected
//! requests and undecodable responses do not get better by waiting.

use std::time::Duration;

use sensei_types::config::DeliveryConfig;
use sensei_types::llm::{DeliveryOutcome, FailureKind, Reply, TransportError};
use tracing::{debug, error, warn};

use crate::transport::provider::ChatTransport;

/// Retry policy for a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl DeliveryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    /// Create a policy. `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &DeliveryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.retry_delay_ms),
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Classify the result of one attempt.
    pub fn classify(result: Result<Reply, TransportError>) -> DeliveryOutcome {
        match result {
            Ok(reply) => DeliveryOutcome::Success(reply),
            Err(err) => match err.kind() {
                FailureKind::Transient => DeliveryOutcome::RetryableFailure(err),
                FailureKind::Fatal => DeliveryOutcome::FatalFailure(err),
            },
        }
    }

    /// Deliver `message`, making at most `max_attempts` attempts.
    ///
    /// Returns `Success`, `FatalFailure` or `Exhausted`; `RetryableFailure`
    /// is consumed internally. Attempts are numbered from 1 in logs.
    pub async fn deliver<T: ChatTransport>(
        &self,
        transport: &mut T,
        message: &str,
    ) -> DeliveryOutcome {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            debug!(attempt, max_attempts = self.max_attempts, "sending message");

            match Self::classify(transport.send(message, false).await) {
                DeliveryOutcome::RetryableFailure(err) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "Error occurred, retrying... attempt {attempt}/{}",
                        self.max_attempts
                    );
                    last_error = Some(err);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                DeliveryOutcome::FatalFailure(err) => {
                    error!(attempt, error = %err, "Unexpected error occurred");
                    return DeliveryOutcome::FatalFailure(err);
                }
                outcome => return outcome,
            }
        }

        error!(
            attempts = self.max_attempts,
            "Unable to obtain a valid response after {} attempts",
            self.max_attempts
        );
        DeliveryOutcome::Exhausted {
            attempts: self.max_attempts,
            last_error,
        }
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}
