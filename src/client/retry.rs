//! Retry with backoff, parameterized by delay schedule and sleeper.

use async_trait::async_trait;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::warn;

/// Total attempts, including the first.
pub const MAX_ATTEMPTS: usize = 3;

/// Suspends the current task between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Delays before each retry: `2^n` seconds for retry `n`, i.e. 2s then 4s.
pub fn default_backoff() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(1000)
        .take(MAX_ATTEMPTS - 1)
}

/// Last error after every attempt failed.
#[derive(Debug)]
pub struct RetriesExhausted<E> {
    pub attempts: u32,
    pub last: E,
}

/// Runs `action` until it succeeds, sleeping through `delays` between failures.
///
/// The action is attempted once more than `delays` yields; the 1-based attempt
/// number is passed in. No sleep follows the final attempt.
///
/// # Errors
///
/// Returns [`RetriesExhausted`] with the last error once the delays run out.
pub async fn retry_with_backoff<T, E, I, F, Fut>(
    delays: I,
    sleeper: &dyn Sleeper,
    mut action: F,
) -> Result<T, RetriesExhausted<E>>
where
    E: Display,
    I: IntoIterator<Item = Duration>,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut delays = delays.into_iter();
    let mut attempt = 0;

    loop {
        attempt += 1;

        let error = match action(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let Some(delay) = delays.next() else {
            return Err(RetriesExhausted {
                attempts: attempt,
                last: error,
            });
        };

        warn!(
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Attempt failed, retrying"
        );
        sleeper.sleep(delay).await;
    }
}
