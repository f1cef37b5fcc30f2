//! Poller configuration.

use std::time::Duration;

/// Configuration for the polling state machine.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Interval between status polls under normal conditions.
    pub poll_interval: Duration,
    /// Delay before retrying after a not-found response, while below the
    /// threshold.
    pub not_found_retry_delay: Duration,
    /// Consecutive not-found responses tolerated before the cadence is
    /// downgraded.
    pub not_found_threshold: u32,
    /// Poll interval once the not-found threshold has been reached.
    pub slow_poll_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            not_found_retry_delay: Duration::from_secs(2),
            not_found_threshold: 5,
            slow_poll_interval: Duration::from_secs(5),
        }
    }
}

impl PollerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            poll_interval: Duration::from_secs(
                std::env::var("VIDGEN_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
            ),
            not_found_retry_delay: Duration::from_secs(
                std::env::var("VIDGEN_NOT_FOUND_RETRY_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2),
            ),
            not_found_threshold: std::env::var("VIDGEN_NOT_FOUND_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            slow_poll_interval: Duration::from_secs(
                std::env::var("VIDGEN_SLOW_POLL_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }

    /// Set the normal poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the not-found retry delay.
    pub fn with_not_found_retry_delay(mut self, delay: Duration) -> Self {
        self.not_found_retry_delay = delay;
        self
    }

    /// Set the not-found threshold.
    pub fn with_not_found_threshold(mut self, threshold: u32) -> Self {
        self.not_found_threshold = threshold;
        self
    }

    /// Set the slow poll interval.
    pub fn with_slow_poll_interval(mut self, interval: Duration) -> Self {
        self.slow_poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PollerConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.not_found_retry_delay, Duration::from_secs(2));
        assert_eq!(config.not_found_threshold, 5);
        assert_eq!(config.slow_poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_config_builders() {
        let config = PollerConfig::default()
            .with_poll_interval(Duration::from_millis(10))
            .with_not_found_threshold(2);
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.not_found_threshold, 2);
    }
}
