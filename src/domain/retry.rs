// src/domain/retry.rs
//
// Backoff schedule for failed ad loads.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exponential backoff with an optional cap on consecutive retries.
///
/// `max_retries: None` retries forever (still with backoff).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub max_retries: Option<u32>,
}

impl RetryPolicy {
    /// Delay before the retry that follows the given consecutive failure.
    ///
    /// Returns None once the retry budget is spent.
    pub fn delay_for(&self, consecutive_failures: u32) -> Option<Duration> {
        if consecutive_failures == 0 {
            return Some(Duration::ZERO);
        }
        if let Some(max) = self.max_retries {
            if consecutive_failures > max {
                return None;
            }
        }

        let exponent = (consecutive_failures - 1).min(32);
        let delay = self
            .base_delay_ms
            .saturating_mul(1u64 << exponent)
            .min(self.max_delay_ms);
        Some(Duration::from_millis(delay))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay_ms: 1_000,
            max_delay_ms: 60_000,
            max_retries: Some(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Some(Duration::from_millis(1_000)));
        assert_eq!(policy.delay_for(2), Some(Duration::from_millis(2_000)));
        assert_eq!(policy.delay_for(3), Some(Duration::from_millis(4_000)));
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(8), Some(Duration::from_millis(60_000)));
        assert_eq!(policy.delay_for(10), Some(Duration::from_millis(60_000)));
    }

    #[test]
    fn test_budget_exhausted() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(11), None);
    }

    #[test]
    fn test_unbounded_never_gives_up() {
        let policy = RetryPolicy {
            max_retries: None,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.delay_for(1_000), Some(Duration::from_millis(60_000)));
    }
}
