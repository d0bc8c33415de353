pub mod retry;

pub use retry::RetryTelemetry;
