//! Retry logic for provider calls
//!
//! LLM output is non-deterministic: a malformed or out-of-range answer on
//! one attempt is often fine on the next. Every failed attempt is logged
//! and retried after a fixed delay, or a longer one when the provider
//! signals rate limiting. Permanent failures (missing or rejected key,
//! unsupported operation) return immediately.

use crate::error::ProviderError;
use geofacts_common::config::ExtractionSettings;
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub rate_limit_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
            rate_limit_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &ExtractionSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
            rate_limit_delay: Duration::from_millis(settings.rate_limit_delay_ms),
        }
    }
}

/// Run `operation` until it succeeds or the policy is exhausted
///
/// # Arguments
/// * `operation_name` - Name for logging (e.g., "country info")
/// * `policy` - Attempt count and delays
/// * `operation` - Async closure performing one provider call
///
/// # Returns
/// The first successful result, the first permanent error, or
/// [`ProviderError::RetriesExhausted`] wrapping the last failure
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        let err = match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::debug!(
                        operation = operation_name,
                        attempt,
                        "Provider call succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(err) => err,
        };

        if err.is_permanent() {
            tracing::error!(
                operation = operation_name,
                error = %err,
                "Permanent provider error - not retrying"
            );
            return Err(err);
        }

        tracing::warn!(
            operation = operation_name,
            "[Retry {}/{}] {}",
            attempt,
            max_attempts,
            err
        );

        if attempt >= max_attempts {
            return Err(ProviderError::RetriesExhausted {
                attempts: max_attempts,
                last: Box::new(err),
            });
        }

        let delay = if err.is_rate_limited() {
            policy.rate_limit_delay
        } else {
            policy.retry_delay
        };
        tracing::debug!(
            operation = operation_name,
            delay_ms = delay.as_millis() as u64,
            "Waiting before next attempt"
        );
        tokio::time::sleep(delay).await;
    }
}
