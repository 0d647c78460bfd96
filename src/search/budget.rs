//! Wall-clock budget and cooperative cancellation for a solve.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::SolveError;

/// Shared flag used to stop an in-flight solve from another thread.
///
/// Clones share the same flag.
///
/// # Examples
///
/// ```
/// use vrp_engine::search::CancellationToken;
///
/// let token = CancellationToken::new();
/// let observer = token.clone();
/// token.cancel();
/// assert!(observer.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    is_cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.is_cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.load(Ordering::Relaxed)
    }
}

/// Limits a single solve: an optional deadline plus a cancellation token.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    started: Instant,
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl SearchBudget {
    /// Starts the clock now.
    pub fn new(time_limit: Option<Duration>, cancellation: CancellationToken) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: time_limit.and_then(|limit| started.checked_add(limit)),
            cancellation,
        }
    }

    /// No deadline and a token nobody else holds.
    pub fn unlimited() -> Self {
        Self::new(None, CancellationToken::new())
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// `Err(Cancelled)` once cancelled, `Err(Timeout)` once past the deadline.
    pub fn check(&self) -> Result<(), SolveError> {
        if self.cancellation.is_cancelled() {
            return Err(SolveError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(SolveError::Timeout {
                elapsed: self.elapsed(),
            });
        }
        Ok(())
    }

    pub fn is_exhausted(&self) -> bool {
        self.check().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_exhausted() {
        let budget = SearchBudget::unlimited();
        assert!(budget.check().is_ok());
        assert!(!budget.is_exhausted());
    }

    #[test]
    fn test_zero_limit_times_out() {
        let budget = SearchBudget::new(Some(Duration::ZERO), CancellationToken::new());
        assert!(matches!(budget.check(), Err(SolveError::Timeout { .. })));
    }

    #[test]
    fn test_cancellation_wins_over_timeout() {
        let token = CancellationToken::new();
        let budget = SearchBudget::new(Some(Duration::ZERO), token.clone());
        token.cancel();
        assert_eq!(budget.check(), Err(SolveError::Cancelled));
    }
}
