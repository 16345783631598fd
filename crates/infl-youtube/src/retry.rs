//! Fixed-cooldown retry for `YouTube` quota errors.
//!
//! The API's quota resets on a window, so backing off exponentially buys
//! nothing: [`retry_on_quota`] sleeps for a fixed cooldown and retries the same
//! call, up to [`RetryPolicy::max_retries`] times. Every other error is returned
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::YouTubeError;

const DEFAULT_COOLDOWN_SECS: u64 = 3600;
const DEFAULT_MAX_RETRIES: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// How long to block after a quota error before retrying.
    pub cooldown: Duration,
    /// Additional attempts after the first one. `0` disables retrying.
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(cooldown: Duration, max_retries: u32) -> Self {
        Self {
            cooldown,
            max_retries,
        }
    }

    /// A policy that never sleeps or retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(Duration::ZERO, 0)
    }
}

/// Runs `operation`, retrying after `policy.cooldown` whenever it fails with
/// [`YouTubeError::QuotaExceeded`].
///
/// With `max_retries = 1` the operation is attempted at most twice. When
/// retries are exhausted the last quota error is returned.
pub(crate) async fn retry_on_quota<T, F, Fut>(
    policy: RetryPolicy,
    endpoint: &str,
    mut operation: F,
) -> Result<T, YouTubeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, YouTubeError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_quota_exceeded() || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                tracing::warn!(
                    endpoint,
                    attempt,
                    max_retries = policy.max_retries,
                    cooldown_secs = policy.cooldown.as_secs(),
                    error = %err,
                    "YouTube quota exceeded; waiting before retrying"
                );
                tokio::time::sleep(policy.cooldown).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn instant(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(Duration::ZERO, max_retries)
    }

    #[test]
    fn default_policy_is_one_hour_single_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.cooldown, Duration::from_secs(3600));
        assert_eq!(policy.max_retries, 1);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_quota(instant(1), "search", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, YouTubeError>(7)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_quota_error_once_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_quota(instant(1), "channels", || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(YouTubeError::QuotaExceeded("quotaExceeded".to_owned()))
                } else {
                    Ok::<u32, YouTubeError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn returns_quota_error_when_retries_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_quota(instant(2), "videos", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(YouTubeError::QuotaExceeded("quotaExceeded".to_owned()))
            }
        })
        .await;
        // max_retries=2 → 3 total attempts
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(YouTubeError::QuotaExceeded(_))));
    }

    #[tokio::test]
    async fn does_not_retry_api_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_quota(instant(3), "channels", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(YouTubeError::Api {
                    status: 404,
                    message: "channelNotFound".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(YouTubeError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn zero_retries_returns_first_quota_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_on_quota(RetryPolicy::none(), "search", || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(YouTubeError::QuotaExceeded("dailyLimitExceeded".to_owned()))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }
}
