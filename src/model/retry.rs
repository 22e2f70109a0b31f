use crate::config::ClientConfig;
use crate::constants::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_SECS, MAX_BACKOFF_SECS};
use reqwest::StatusCode;
use std::time::Duration;

/// Transport-level retry behavior.
///
/// Applies to every verb, on the listed status codes and on connection-level
/// errors, before the caller ever observes a final response. Session expiry
/// (401) is handled separately by the client and is not retryable here.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Base delay between retries (doubles each attempt)
    pub base_delay: Duration,
    /// Upper bound for a single backoff delay
    pub max_delay: Duration,
    /// HTTP status codes that trigger a retry
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            max_delay: Duration::from_secs(MAX_BACKOFF_SECS),
            retryable_statuses: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default retry budget and status set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the policy from a client configuration
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_secs(config.retry_delay_secs),
            ..Self::default()
        }
    }

    /// Delay before retry `attempt` (1-based): `base * 2^(attempt-1)`, capped
    /// at `max_delay`.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(63);
        let base_ms = self.base_delay.as_millis() as u64;
        let delay_ms = base_ms.saturating_mul(1u64 << shift);
        let max_ms = self.max_delay.as_millis() as u64;
        Duration::from_millis(delay_ms.min(max_ms))
    }

    /// Whether a status code is in the retryable set
    #[must_use]
    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        self.retryable_statuses.contains(&status.as_u16())
    }
}
