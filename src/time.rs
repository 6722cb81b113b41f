//! Time abstraction for testability.
//!
//! This module provides a [`Sleeper`] trait that allows injecting instant
//! sleepers in tests while using real tokio timers in production.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Abstraction over async sleeping.
///
/// The dispatch loop suspends twice per attempt at most: the pacing delay
/// and the rate-limit cooldown. Both go through this trait so tests can
/// observe the requested durations without waiting for them.
///
/// # Example
///
/// ```
/// use hook_pacer::time::{Sleeper, TokioSleeper};
/// use std::time::Duration;
///
/// # async fn example() {
/// TokioSleeper.sleep(Duration::from_millis(10)).await;
/// # }
/// ```
pub trait Sleeper: Send + Sync {
    /// Suspends for the given duration.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately and records every requested duration.
///
/// Clones share the same record, so a test can keep one handle while the
/// dispatcher owns the other.
#[derive(Debug, Clone, Default)]
pub struct InstantSleeper {
    recorded: Arc<Mutex<Vec<Duration>>>,
}

impl InstantSleeper {
    /// Creates a sleeper with an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every duration requested so far, in order.
    #[must_use]
    pub fn recorded(&self) -> Vec<Duration> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        tokio::task::yield_now().await;
    }
}
