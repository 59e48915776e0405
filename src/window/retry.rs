//! Bounded retry for embedding calls made while filling the window

use crate::core::EmbeddingError;
use std::thread;
use std::time::Duration;

/// Exponential backoff with a fixed attempt budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each time after
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// No delay between attempts
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Delay after the given failed attempt (1-based)
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.initial_backoff.saturating_mul(factor)
    }

    /// Run `op` until it succeeds, fails permanently, or the budget runs out
    ///
    /// Only transient errors are retried.
    ///
    /// # Errors
    ///
    /// Returns the last error seen.
    pub fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, EmbeddingError>
    where
        F: FnMut() -> Result<T, EmbeddingError>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < attempts => {
                    let delay = self.backoff(attempt);
                    tracing::warn!(
                        what,
                        attempt,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "embedding call failed, retrying"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy {
            max_attempts: 4,
            initial_backoff: Duration::from_millis(100),
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let result = RetryPolicy::immediate(3).run("nearest", || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(EmbeddingError::Unavailable("busy".into()))
            } else {
                Ok(42)
            }
        });
        assert_eq!(result, Ok(42));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn gives_up_after_budget() {
        let calls = Cell::new(0);
        let result: Result<(), _> = RetryPolicy::immediate(3).run("nearest", || {
            calls.set(calls.get() + 1);
            Err(EmbeddingError::Unavailable("down".into()))
        });
        assert!(matches!(result, Err(EmbeddingError::Unavailable(_))));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn permanent_errors_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), _> = RetryPolicy::immediate(5).run("nearest", || {
            calls.set(calls.get() + 1);
            Err(EmbeddingError::OutOfVocabulary("없는말".into()))
        });
        assert!(matches!(result, Err(EmbeddingError::OutOfVocabulary(_))));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn zero_attempts_still_runs_once() {
        let calls = Cell::new(0);
        let _ = RetryPolicy::immediate(0).run("nearest", || {
            calls.set(calls.get() + 1);
            Ok::<_, EmbeddingError>(())
        });
        assert_eq!(calls.get(), 1);
    }
}
