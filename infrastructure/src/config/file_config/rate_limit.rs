//! Throttle and retry configuration from TOML (`[rate_limit]` section)

use curator_application::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw rate limit configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRateLimitConfig {
    /// Delay paid before every model call
    pub request_delay_ms: u64,
    pub max_attempts: u32,
    pub rate_limit_backoff_secs: u64,
    pub generic_backoff_secs: u64,
}

impl Default for FileRateLimitConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
            max_attempts: 3,
            rate_limit_backoff_secs: 10,
            generic_backoff_secs: 2,
        }
    }
}

impl FileRateLimitConfig {
    pub fn to_retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            request_delay: Duration::from_millis(self.request_delay_ms),
            max_attempts: self.max_attempts,
            rate_limit_backoff: Duration::from_secs(self.rate_limit_backoff_secs),
            generic_backoff: Duration::from_secs(self.generic_backoff_secs),
        }
        .with_max_attempts(self.max_attempts)
    }
}
