use jiff::Timestamp;
use serde::Serialize;

/// Result of a whole retry sequence, as last produced by the unit of work.
///
/// `output` and `error_message` are independent; a unit of work may fill both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetryOutcome {
    pub success: bool,
    pub output: String,
    pub error_message: String,
    /// Zero-based index of the attempt that produced this outcome.
    pub retry_count: u32,
    pub timestamp: Timestamp,
    /// Set when the sequence stopped because its cancellation token fired.
    pub cancelled: bool,
}

impl RetryOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            ..Self::empty()
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
            ..Self::empty()
        }
    }

    /// Failing outcome with nothing but a timestamp, returned when no attempt ran.
    pub fn empty() -> Self {
        Self {
            success: false,
            output: String::new(),
            error_message: String::new(),
            retry_count: 0,
            timestamp: Timestamp::now(),
            cancelled: false,
        }
    }

    /// Number of times the unit of work ran to produce this outcome.
    pub fn attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }

    pub(crate) fn mark_cancelled(&mut self, attempts: u32) {
        let notice = format!("retry cancelled after {attempts} attempt(s)");
        if self.error_message.is_empty() {
            self.error_message = notice;
        } else {
            self.error_message = format!("{}; {notice}", self.error_message);
        }
        self.cancelled = true;
        self.success = false;
    }
}
