mod backoff;
mod executor;
mod outcome;
mod policy;

pub use backoff::{BackoffStrategy, ExponentialBackoff};
pub use executor::{RetryExecutor, execute};
pub use outcome::RetryOutcome;
pub use policy::RetryPolicy;
