use std::time::Duration;

use tracing::{Level, event};
use uuid::Uuid;

use crate::retry::RetryOutcome;

/// Structured events for one retry sequence, correlated by `sequence_id`.
#[derive(Clone, Debug)]
pub struct RetryTelemetry {
    sequence_id: Uuid,
    operation: String,
}

impl RetryTelemetry {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            sequence_id: Uuid::new_v4(),
            operation: operation.into(),
        }
    }

    pub fn sequence_id(&self) -> Uuid {
        self.sequence_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn emit_attempt(&self, attempt: u32, max_attempts: u32) {
        event!(
            Level::DEBUG,
            sequence_id = %self.sequence_id,
            operation = %self.operation,
            attempt,
            max_attempts,
            "retry.attempt"
        );
    }

    pub fn emit_scheduling(&self, attempt: u32, max_attempts: u32, delay: Duration, error: &str) {
        event!(
            Level::WARN,
            sequence_id = %self.sequence_id,
            operation = %self.operation,
            attempt,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error,
            "retry.scheduling"
        );
    }

    pub fn emit_cancelled(&self, attempts: u32) {
        event!(
            Level::WARN,
            sequence_id = %self.sequence_id,
            operation = %self.operation,
            attempts,
            "retry.cancelled"
        );
    }

    pub fn emit_misconfigured(&self, max_attempts: u32) {
        event!(
            Level::WARN,
            sequence_id = %self.sequence_id,
            operation = %self.operation,
            max_attempts,
            "retry.misconfigured"
        );
    }

    pub fn emit_outcome(&self, outcome: &RetryOutcome, attempts: u32, total_elapsed: Duration) {
        event!(
            Level::INFO,
            sequence_id = %self.sequence_id,
            operation = %self.operation,
            attempts,
            success = outcome.success,
            cancelled = outcome.cancelled,
            total_elapsed_ms = total_elapsed.as_millis() as u64,
            "retry.outcome"
        );
    }
}
