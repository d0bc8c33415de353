#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use retry_engine::{ExponentialBackoff, RetryOutcome, RetryPolicy};

pub fn fixed_policy(max_attempts: u32, delay: Duration) -> RetryPolicy {
    RetryPolicy::exponential(max_attempts, ExponentialBackoff::new(delay, delay, 1.0, 0.0))
}

/// Counts calls; fails the first `failures` of them and succeeds afterwards.
#[derive(Clone)]
pub struct FlakyWork {
    calls: Arc<AtomicU32>,
    failures: u32,
}

impl FlakyWork {
    pub fn new(failures: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            failures,
        }
    }

    pub fn always_failing() -> Self {
        Self::new(u32::MAX)
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call(&self) -> std::future::Ready<RetryOutcome> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = if call < self.failures {
            RetryOutcome::failure(format!("attempt {call} failed"))
        } else {
            RetryOutcome::success(format!("ok after {call} failures"))
        };
        std::future::ready(outcome)
    }
}

pub fn outcome(success: bool, retry_count: u32) -> RetryOutcome {
    let mut outcome = if success {
        RetryOutcome::success("ok")
    } else {
        RetryOutcome::failure("failed")
    };
    outcome.retry_count = retry_count;
    outcome
}
