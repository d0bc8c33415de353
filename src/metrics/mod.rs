mod collector;
mod operation;

pub use collector::MetricsCollector;
pub use operation::OperationMetrics;
