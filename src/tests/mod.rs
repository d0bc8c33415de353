
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::retry::execute;
use test_support::{fixed_policy, flaky_work};

#[tokio::test(start_paused = true)]
async fn recovers_after_two_failures() {
    let policy = fixed_policy(5, Duration::from_millis(250));
    let (calls, work) = flaky_work(2);

    let outcome = execute(&policy, &CancellationToken::new(), work).await;

    assert!(outcome.success);
    assert_eq!(outcome.retry_count, 2);
    assert_eq!(outcome.output, "done");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
