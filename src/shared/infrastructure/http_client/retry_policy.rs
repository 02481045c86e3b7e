//! Retry policies for Studio and search-index requests
//!
//! Transport failures and 5xx responses are retried with backoff. 4xx
//! responses never are, so validation errors surface on the first attempt.

use rand::Rng;
use std::time::Duration;

/// Configuration for HTTP retry behavior
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries (will be adjusted based on headers)
    pub base_delay: Duration,
    /// Maximum delay to wait (prevents excessive waits)
    pub max_delay: Duration,
    /// Whether to use exponential backoff
    pub exponential_backoff: bool,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
    /// Add up to 20% random jitter to computed delays
    pub jitter: bool,
}

impl RetryPolicy {
    /// Policy for the Studio REST API
    pub fn studio() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            exponential_backoff: true,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Policy for the search index; facet queries are cheap to repeat
    pub fn search() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            exponential_backoff: true,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }

    /// Single attempt, used by tests and one-shot tooling
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            exponential_backoff: false,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    #[cfg(test)]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Calculate delay for next retry attempt
    pub fn calculate_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        // If server provided Retry-After header, respect it
        if let Some(server_delay) = retry_after {
            return server_delay.min(self.max_delay);
        }

        let delay = if self.exponential_backoff {
            let multiplier = self.backoff_multiplier.powi(attempt as i32);
            Duration::from_millis((self.base_delay.as_millis() as f64 * multiplier) as u64)
        } else {
            self.base_delay
        };

        let delay = if self.jitter && !delay.is_zero() {
            let factor = rand::thread_rng().gen_range(1.0..1.2);
            delay.mul_f64(factor)
        } else {
            delay
        };

        delay.min(self.max_delay)
    }
}

/// Retry-After information extracted from 429/503 responses
#[derive(Debug, Clone, Default)]
pub struct RateLimitInfo {
    /// How long to wait before next request (from Retry-After header)
    pub retry_after: Option<Duration>,
    /// Number of requests remaining (from X-RateLimit-Remaining header)
    pub remaining: Option<u32>,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let retry_after = headers
            .get("retry-after")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let remaining = headers
            .get("x-ratelimit-remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.trim().parse::<u32>().ok());

        Self {
            retry_after,
            remaining,
        }
    }
}

/// Whether a response status is worth another attempt
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 500..=599)
}

/// Determines if a transport error is retryable
pub fn is_retryable_error(error: &reqwest::Error) -> bool {
    if let Some(status) = error.status() {
        is_retryable_status(status.as_u16())
    } else {
        // Network errors are potentially retryable
        error.is_timeout() || error.is_connect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_studio_policy() {
        let policy = RetryPolicy::studio();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert!(policy.exponential_backoff);
    }

    #[test]
    fn test_calculate_delay_with_retry_after() {
        let policy = RetryPolicy::studio();
        let delay = policy.calculate_delay(1, Some(Duration::from_secs(3)));
        assert_eq!(delay, Duration::from_secs(3));

        // Server hints are still capped
        let capped = policy.calculate_delay(1, Some(Duration::from_secs(300)));
        assert_eq!(capped, policy.max_delay);
    }

    #[test]
    fn test_calculate_delay_exponential_backoff() {
        let policy = RetryPolicy::studio().without_jitter();
        assert_eq!(policy.calculate_delay(0, None), Duration::from_millis(500));
        assert_eq!(policy.calculate_delay(1, None), Duration::from_millis(1000));
        assert_eq!(policy.calculate_delay(2, None), Duration::from_millis(2000));
        assert_eq!(policy.calculate_delay(10, None), Duration::from_secs(10));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let policy = RetryPolicy::search();
        for _ in 0..50 {
            let delay = policy.calculate_delay(0, None);
            assert!(delay >= Duration::from_millis(250));
            assert!(delay < Duration::from_millis(300));
        }
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(429));
        assert!(!is_retryable_status(408));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(403));
        assert!(!is_retryable_status(404));
    }

    #[test]
    fn test_rate_limit_info_parsing() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("retry-after", "7".parse().unwrap());
        headers.insert("x-ratelimit-remaining", "0".parse().unwrap());

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.retry_after, Some(Duration::from_secs(7)));
        assert_eq!(info.remaining, Some(0));
    }
}
