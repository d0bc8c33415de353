pub mod config;
pub mod errors;
pub mod metrics;
pub mod retry;
pub mod telemetry;

pub use config::{Config, ConfigLocation, read_config};
pub use errors::Error;
pub use metrics::{MetricsCollector, OperationMetrics};
pub use retry::{
    BackoffStrategy, ExponentialBackoff, RetryExecutor, RetryOutcome, RetryPolicy, execute,
};
pub use tokio_util::sync::CancellationToken;

#[cfg(test)]
mod tests;
