use std::future::Future;
use std::sync::Arc;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::metrics::MetricsCollector;
use crate::telemetry::RetryTelemetry;

use super::{RetryOutcome, RetryPolicy};

const UNNAMED_OPERATION: &str = "unnamed";

/// Runs `work` until it succeeds or the policy's attempt budget is spent.
///
/// Attempts are sequential. Between attempts the task sleeps for the strategy's
/// backoff unless `cancel` fires first, in which case the last outcome is
/// returned with a cancellation notice appended. Cancellation never interrupts a
/// running attempt. With `max_attempts == 0` nothing runs and a failing, empty
/// outcome comes back.
pub async fn execute<F, Fut>(policy: &RetryPolicy, cancel: &CancellationToken, work: F) -> RetryOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RetryOutcome>,
{
    let telemetry = RetryTelemetry::new(UNNAMED_OPERATION);
    run_sequence(policy, cancel, &telemetry, work).await
}

async fn run_sequence<F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    telemetry: &RetryTelemetry,
    mut work: F,
) -> RetryOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RetryOutcome>,
{
    let start = Instant::now();
    let max_attempts = policy.max_attempts();
    if max_attempts == 0 {
        telemetry.emit_misconfigured(max_attempts);
        let outcome = RetryOutcome::empty();
        telemetry.emit_outcome(&outcome, 0, start.elapsed());
        return outcome;
    }

    let mut attempt: u32 = 0;
    loop {
        telemetry.emit_attempt(attempt, max_attempts);
        let mut outcome = work().await;
        outcome.retry_count = attempt;
        let attempts = outcome.attempts();

        if outcome.success || attempts >= max_attempts {
            telemetry.emit_outcome(&outcome, attempts, start.elapsed());
            return outcome;
        }

        let delay = policy.strategy().next_backoff(attempt);
        telemetry.emit_scheduling(attempt, max_attempts, delay, &outcome.error_message);
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                outcome.mark_cancelled(attempts);
                telemetry.emit_cancelled(attempts);
                telemetry.emit_outcome(&outcome, attempts, start.elapsed());
                return outcome;
            }
            () = tokio::time::sleep(delay) => {}
        }
        attempt = attempts;
    }
}

/// A policy bound to an operation name, optionally feeding a [`MetricsCollector`].
#[derive(Clone, Debug)]
pub struct RetryExecutor {
    operation: String,
    policy: RetryPolicy,
    collector: Option<Arc<MetricsCollector>>,
}

impl RetryExecutor {
    pub fn new(operation: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            operation: operation.into(),
            policy,
            collector: None,
        }
    }

    pub fn with_collector(mut self, collector: Arc<MetricsCollector>) -> Self {
        self.collector = Some(collector);
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Same as [`execute`], then records the terminal outcome under this
    /// executor's operation name.
    pub async fn run<F, Fut>(&self, cancel: &CancellationToken, work: F) -> RetryOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RetryOutcome>,
    {
        let telemetry = RetryTelemetry::new(self.operation());
        let outcome = run_sequence(self.policy(), cancel, &telemetry, work).await;
        if let Some(collector) = &self.collector {
            collector.record_result(self.operation(), &outcome);
        }
        outcome
    }
}
