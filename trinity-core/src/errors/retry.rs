use std::thread;
use std::time::Duration;

use super::{TrinityError, TrinityResult};

/// Linear backoff retry policy (spec §7: "retried up to 3 times with linear
/// backoff only for embedding and persistence").
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Delay before the given attempt (1-indexed), linear in the attempt number.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Retry a synchronous fallible operation under `policy`, but only for
/// errors `TrinityError::is_retryable()` reports as transient. Any other
/// error is returned immediately without retrying.
pub fn retry_with_backoff<T>(
    policy: RetryPolicy,
    mut op: impl FnMut() -> TrinityResult<T>,
) -> TrinityResult<T> {
    let mut attempt = 1;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                thread::sleep(policy.delay_for(attempt));
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
