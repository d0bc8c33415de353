use std::fmt;
use std::sync::Arc;

use crate::config::Config;

use super::backoff::{BackoffStrategy, ExponentialBackoff};

/// Attempt budget plus the strategy spacing the attempts.
///
/// Cloning is cheap and shares the strategy, so one policy can drive any number
/// of concurrent retry sequences.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    strategy: Arc<dyn BackoffStrategy>,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, strategy: Arc<dyn BackoffStrategy>) -> Self {
        Self {
            max_attempts,
            strategy,
        }
    }

    pub fn exponential(max_attempts: u32, backoff: ExponentialBackoff) -> Self {
        Self::new(max_attempts, Arc::new(backoff))
    }

    /// Policy built from [`Config::default`].
    pub fn default_policy() -> Self {
        Config::default().into_policy()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn strategy(&self) -> &dyn BackoffStrategy {
        self.strategy.as_ref()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::default_policy()
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}
