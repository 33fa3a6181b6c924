//! Tracker configuration from construction arguments or environment.

use std::env;
use std::time::Duration;

pub const DEFAULT_MAX_POINTS: usize = 15;
pub const DEFAULT_SAMPLE_PERIOD: Duration = Duration::from_secs(60);
pub const DEFAULT_SAMPLE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Route length at which tracking completes (minimum 1).
    pub max_points: usize,
    /// Period between samples once tracking is active.
    pub sample_period: Duration,
    /// Timeout applied to each position request.
    pub sample_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_POINTS,
            sample_period: DEFAULT_SAMPLE_PERIOD,
            sample_timeout: DEFAULT_SAMPLE_TIMEOUT,
        }
    }
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        Self {
            max_points: env::var("WAYTRACE_MAX_POINTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_POINTS),
            sample_period: env::var("WAYTRACE_SAMPLE_PERIOD_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SAMPLE_PERIOD),
            sample_timeout: env::var("WAYTRACE_SAMPLE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SAMPLE_TIMEOUT),
        }
    }

    /// Replace unusable values with workable ones.
    pub(crate) fn normalized(mut self) -> Self {
        self.max_points = self.max_points.max(1);
        if self.sample_period.is_zero() {
            self.sample_period = DEFAULT_SAMPLE_PERIOD;
        }
        if self.sample_timeout.is_zero() {
            self.sample_timeout = DEFAULT_SAMPLE_TIMEOUT;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let config = TrackerConfig::default();
        assert_eq!(config.max_points, 15);
        assert_eq!(config.sample_period, Duration::from_secs(60));
        assert_eq!(config.sample_timeout, Duration::from_secs(10));
    }

    #[test]
    fn normalized_clamps_degenerate_values() {
        let config = TrackerConfig {
            max_points: 0,
            sample_period: Duration::ZERO,
            sample_timeout: Duration::ZERO,
        }
        .normalized();

        assert_eq!(config.max_points, 1);
        assert_eq!(config.sample_period, DEFAULT_SAMPLE_PERIOD);
        assert_eq!(config.sample_timeout, DEFAULT_SAMPLE_TIMEOUT);
    }
}
