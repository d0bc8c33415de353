use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Computes how long to wait before the next attempt.
///
/// `attempt` is the zero-based count of failures so far, so the wait after the
/// first failed attempt is `next_backoff(0)`. Implementations are shared across
/// concurrent retry sequences and must be safe to call from many tasks at once.
pub trait BackoffStrategy: Send + Sync {
    fn next_backoff(&self, attempt: u32) -> Duration;
}

/// Exponential growth capped at `max_backoff`, perturbed by a symmetric jitter.
///
/// `multiplier` and `jitter_fraction` are taken as given. Callers are expected
/// to pass `multiplier >= 1.0` and `0.0 <= jitter_fraction <= 1.0`.
pub struct ExponentialBackoff {
    initial_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
    jitter_fraction: f64,
    rng: Mutex<StdRng>,
}

impl ExponentialBackoff {
    pub fn new(
        initial_backoff: Duration,
        max_backoff: Duration,
        multiplier: f64,
        jitter_fraction: f64,
    ) -> Self {
        Self::with_rng(
            initial_backoff,
            max_backoff,
            multiplier,
            jitter_fraction,
            StdRng::from_entropy(),
        )
    }

    /// Same as [`ExponentialBackoff::new`] but with a reproducible jitter sequence.
    pub fn with_seed(
        initial_backoff: Duration,
        max_backoff: Duration,
        multiplier: f64,
        jitter_fraction: f64,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            initial_backoff,
            max_backoff,
            multiplier,
            jitter_fraction,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        initial_backoff: Duration,
        max_backoff: Duration,
        multiplier: f64,
        jitter_fraction: f64,
        rng: StdRng,
    ) -> Self {
        Self {
            initial_backoff,
            max_backoff,
            multiplier,
            jitter_fraction,
            rng: Mutex::new(rng),
        }
    }

    pub fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    pub fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn jitter_fraction(&self) -> f64 {
        self.jitter_fraction
    }

    /// The capped delay for `attempt` before jitter is applied.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let factor = self.multiplier.powi(exponent);
        let raw = self.initial_backoff.as_secs_f64() * factor;
        let cap = self.max_backoff.as_secs_f64();
        // NaN and infinity both land on the cap.
        if !raw.is_finite() || raw >= cap {
            return self.max_backoff;
        }
        Duration::from_secs_f64(raw.max(0.0))
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn next_backoff(&self, attempt: u32) -> Duration {
        let capped = self.base_delay(attempt).as_secs_f64();
        let (draw, add) = {
            let mut rng = self.rng.lock();
            (rng.gen_range(0.0..1.0), rng.gen_bool(0.5))
        };
        let jitter = draw * capped * self.jitter_fraction;
        let jittered = if add { capped + jitter } else { capped - jitter };
        if jittered.is_nan() || jittered <= 0.0 {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(jittered).unwrap_or(Duration::MAX)
    }
}

impl fmt::Debug for ExponentialBackoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExponentialBackoff")
            .field("initial_backoff", &self.initial_backoff)
            .field("max_backoff", &self.max_backoff)
            .field("multiplier", &self.multiplier)
            .field("jitter_fraction", &self.jitter_fraction)
            .finish_non_exhaustive()
    }
}
