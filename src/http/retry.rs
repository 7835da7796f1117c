//! Retry policies for provider GET requests.
//!
//! The OHLCV endpoint is always requested with [`RetryPolicy::None`]; a failed
//! candle fetch means "no analysis" and the caller moves on. Lookup endpoints
//! (pairs, pools, boosts) use whatever policy the client was built with.

use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Exactly one attempt.
    #[default]
    None,
    /// Retry on transport failures, 429 and 502/503/504 with exponential backoff.
    Idempotent,
    /// Caller-provided retry behaviour.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// The backoff schedule for this policy, or `None` for a single attempt.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Backoff schedule.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial request.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(8),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// Default schedule for public read-only endpoints. DexScreener and
    /// GeckoTerminal both answer 429 when the per-minute budget is spent.
    pub fn idempotent() -> Self {
        Self {
            retryable_statuses: vec![429, 502, 503, 504],
            ..Self::default()
        }
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base =
            self.initial_delay.as_millis() as f64 * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let spread = capped * 0.25;
            (capped + (rand::random::<f64>() - 0.5) * 2.0 * spread).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }

    /// Delay before retry number `attempt` when the server sent a
    /// `Retry-After` hint. The hint wins over the backoff but never exceeds
    /// `max_delay`.
    pub fn delay_with_hint(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self.delay_for_attempt(attempt);
        match retry_after {
            Some(hint) => hint.min(self.max_delay).max(backoff),
            None => backoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(initial_ms: u64, max_ms: u64, factor: f64) -> RetryConfig {
        RetryConfig {
            max_retries: 5,
            initial_delay: Duration::from_millis(initial_ms),
            max_delay: Duration::from_millis(max_ms),
            backoff_factor: factor,
            jitter: false,
            retryable_statuses: vec![],
        }
    }

    #[test]
    fn test_retry_policy_default_is_single_attempt() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::None));
        assert!(RetryPolicy::None.config().is_none());
    }

    #[test]
    fn test_idempotent_retries_rate_limits() {
        let config = RetryPolicy::Idempotent.config().unwrap();
        assert!(config.is_retryable_status(429));
        assert!(config.is_retryable_status(503));
        assert!(!config.is_retryable_status(500));
        assert!(!config.is_retryable_status(404));
    }

    #[test]
    fn test_custom_policy_passes_config_through() {
        let policy = RetryPolicy::Custom(fixed(10, 100, 3.0));
        let config = policy.config().unwrap();
        assert_eq!(config.initial_delay, Duration::from_millis(10));
        assert_eq!(config.max_retries, 5);
    }

    #[test]
    fn test_delay_grows_exponentially() {
        let config = fixed(100, 10_000, 2.0);
        assert_eq!(config.delay_for_attempt(0).as_millis(), 100);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 200);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 400);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = fixed(1000, 2000, 10.0);
        assert_eq!(config.delay_for_attempt(3).as_millis(), 2000);
    }

    #[test]
    fn test_jittered_delay_stays_in_band() {
        let config = RetryConfig {
            jitter: true,
            ..fixed(1000, 10_000, 1.0)
        };
        for _ in 0..50 {
            let ms = config.delay_for_attempt(0).as_millis();
            assert!((750..=1250).contains(&ms), "{} out of band", ms);
        }
    }

    #[test]
    fn test_retry_after_hint_is_capped() {
        let config = fixed(10, 2_000, 2.0);
        assert_eq!(config.delay_with_hint(0, None), Duration::from_millis(10));
        assert_eq!(
            config.delay_with_hint(0, Some(Duration::from_millis(500))),
            Duration::from_millis(500)
        );
        assert_eq!(
            config.delay_with_hint(0, Some(Duration::from_secs(3_600))),
            Duration::from_millis(2_000)
        );
        assert_eq!(
            config.delay_with_hint(0, Some(Duration::from_millis(u64::MAX))),
            Duration::from_millis(2_000)
        );
        // A hint shorter than the backoff does not shorten it.
        assert_eq!(
            config.delay_with_hint(3, Some(Duration::from_millis(1))),
            Duration::from_millis(80)
        );
    }
}
