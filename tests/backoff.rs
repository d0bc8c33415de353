use std::sync::Arc;
use std::time::Duration;

use retry_engine::{BackoffStrategy, ExponentialBackoff};

#[test]
fn backoff_never_exceeds_jittered_cap() {
    let max = Duration::from_secs(2);
    for seed in 0..20 {
        let backoff =
            ExponentialBackoff::with_seed(Duration::from_millis(25), max, 3.0, 0.5, seed);
        for attempt in 0..64 {
            let delay = backoff.next_backoff(attempt);
            assert!(delay <= max.mul_f64(1.5), "seed {seed} attempt {attempt}: {delay:?}");
        }
    }
}

#[test]
fn capped_attempts_stay_inside_band() {
    let backoff = ExponentialBackoff::with_seed(
        Duration::from_millis(100),
        Duration::from_secs(1),
        2.0,
        0.2,
        11,
    );
    for _ in 0..100 {
        let delay = backoff.next_backoff(20);
        assert!(delay >= Duration::from_millis(800));
        assert!(delay <= Duration::from_millis(1200));
    }
}

#[test]
fn same_seed_yields_same_sequence() {
    let build = || {
        ExponentialBackoff::with_seed(
            Duration::from_millis(100),
            Duration::from_secs(30),
            2.0,
            0.1,
            42,
        )
    };
    let first: Vec<_> = (0..8).map(|a| build().next_backoff(a)).collect();
    let second: Vec<_> = (0..8).map(|a| build().next_backoff(a)).collect();
    assert_eq!(first, second);
}

#[test]
fn jitter_spreads_values() {
    let backoff = ExponentialBackoff::with_seed(
        Duration::from_millis(100),
        Duration::from_secs(30),
        2.0,
        0.1,
        3,
    );
    let samples: Vec<_> = (0..50).map(|_| backoff.next_backoff(3)).collect();
    assert!(samples.iter().any(|d| *d > Duration::from_millis(800)));
    assert!(samples.iter().any(|d| *d < Duration::from_millis(800)));
}

#[test]
fn shared_instance_is_usable_across_threads() {
    let backoff: Arc<dyn BackoffStrategy> = Arc::new(ExponentialBackoff::new(
        Duration::from_millis(10),
        Duration::from_millis(500),
        2.0,
        0.25,
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let backoff = Arc::clone(&backoff);
            std::thread::spawn(move || {
                (0..1_000)
                    .map(|i| backoff.next_backoff(i % 12))
                    .max()
                    .unwrap_or_default()
            })
        })
        .collect();

    for handle in handles {
        let worst = handle.join().unwrap();
        assert!(worst <= Duration::from_millis(625));
    }
}
