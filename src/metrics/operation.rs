use jiff::Timestamp;
use serde::Serialize;

use crate::retry::RetryOutcome;

/// Aggregated outcomes of every retry sequence recorded under one operation name.
///
/// Counters count sequences, not individual attempts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationMetrics {
    pub total_attempts: u64,
    pub successful_attempts: u64,
    pub failed_attempts: u64,
    pub success_after_retry: u64,
    pub failed_after_retries: u64,
    pub success_rate: f64,
    /// `success_after_retry / (successful_attempts + failed_after_retries)`.
    pub success_after_retry_rate: f64,
    pub last_recorded_at: Timestamp,
}

impl OperationMetrics {
    pub(crate) fn new(now: Timestamp) -> Self {
        Self {
            total_attempts: 0,
            successful_attempts: 0,
            failed_attempts: 0,
            success_after_retry: 0,
            failed_after_retries: 0,
            success_rate: 0.0,
            success_after_retry_rate: 0.0,
            last_recorded_at: now,
        }
    }

    pub(crate) fn record(&mut self, outcome: &RetryOutcome, now: Timestamp) {
        self.total_attempts += 1;
        self.last_recorded_at = now;

        let retried = outcome.retry_count > 0;
        if outcome.success {
            self.successful_attempts += 1;
            if retried {
                self.success_after_retry += 1;
            }
        } else {
            self.failed_attempts += 1;
            if retried {
                self.failed_after_retries += 1;
            }
        }

        if self.total_attempts > 0 {
            self.success_rate = self.successful_attempts as f64 / self.total_attempts as f64;
        }
        let retry_denominator = self.successful_attempts + self.failed_after_retries;
        if retry_denominator > 0 {
            self.success_after_retry_rate =
                self.success_after_retry as f64 / retry_denominator as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(success: bool, retry_count: u32) -> RetryOutcome {
        let mut outcome = if success {
            RetryOutcome::success("ok")
        } else {
            RetryOutcome::failure("boom")
        };
        outcome.retry_count = retry_count;
        outcome
    }

    #[test]
    fn first_failure_without_retry_leaves_retry_rate_untouched() {
        let mut metrics = OperationMetrics::new(Timestamp::now());
        metrics.record(&outcome(false, 0), Timestamp::now());
        assert_eq!(metrics.total_attempts, 1);
        assert_eq!(metrics.failed_attempts, 1);
        assert_eq!(metrics.success_rate, 0.0);
        assert_eq!(metrics.success_after_retry_rate, 0.0);
    }

    #[test]
    fn retried_failure_counts_toward_retry_rate_denominator() {
        let mut metrics = OperationMetrics::new(Timestamp::now());
        metrics.record(&outcome(true, 1), Timestamp::now());
        metrics.record(&outcome(false, 2), Timestamp::now());
        assert_eq!(metrics.success_after_retry, 1);
        assert_eq!(metrics.failed_after_retries, 1);
        assert_eq!(metrics.success_after_retry_rate, 0.5);
        assert_eq!(metrics.success_rate, 0.5);
    }
}
