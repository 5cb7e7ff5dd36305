//! Trailing-edge debounce over tokio time.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Holds back a rapidly changing value until it has been stable for `delay`.
///
/// Every [`push`](Debouncer::push) replaces the pending value and restarts the
/// window, so only the last value of a burst is ever released. Dropping the
/// debouncer or calling [`cancel`](Debouncer::cancel) discards the pending
/// value and its timer.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops the pending value; returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Waits for the pending value to settle and releases it.
    ///
    /// Never resolves while nothing is pending. Cancel safe: a value is only
    /// taken once its deadline has passed, so dropping this future inside
    /// `select!` loses nothing.
    pub async fn next(&mut self) -> T {
        loop {
            let Some((_, deadline)) = self.pending.as_ref() else {
                std::future::pending::<()>().await;
                continue;
            };
            sleep_until(*deadline).await;
            if let Some((value, deadline)) = self.pending.take() {
                if deadline <= Instant::now() {
                    return value;
                }
                self.pending = Some((value, deadline));
            }
        }
    }
}
