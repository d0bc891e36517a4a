//! Trailing-edge debouncing driven by explicit timestamps.

use std::time::{Duration, Instant};

/// Default quiet period for search inputs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Holds the latest value until no new value has arrived for `delay`.
///
/// Each [`push`](Self::push) replaces the pending value and restarts the
/// window, so a burst of pushes releases exactly one value: the last.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn push(&mut self, value: T, at: Instant) {
        self.pending = Some((value, at));
    }

    /// When the pending value will be released, if nothing else arrives.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }

    /// Release the pending value once its window has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (_, at) = self.pending.as_ref()?;
        if now.saturating_duration_since(*at) < self.delay {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
