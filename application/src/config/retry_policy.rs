//! Throttling and backoff for outbound model calls.

use std::time::Duration;

/// How the model client paces and retries calls.
///
/// `request_delay` is paid before every attempt, not only after failures.
/// Backoff grows linearly with the attempt number and starts higher for
/// rate-limit errors than for other transient errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub request_delay: Duration,
    pub max_attempts: u32,
    pub rate_limit_backoff: Duration,
    pub generic_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs(1),
            max_attempts: 3,
            rate_limit_backoff: Duration::from_secs(10),
            generic_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// No delays at all; used by tests.
    pub fn immediate() -> Self {
        Self {
            request_delay: Duration::ZERO,
            max_attempts: 3,
            rate_limit_backoff: Duration::ZERO,
            generic_backoff: Duration::ZERO,
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Wait before retrying after the given 0-based failed attempt.
    pub fn backoff(&self, attempt: u32, rate_limited: bool) -> Duration {
        let base = if rate_limited {
            self.rate_limit_backoff
        } else {
            self.generic_backoff
        };
        base * (attempt + 1)
    }
}
