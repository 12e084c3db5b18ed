//! Time source abstraction for the polling loop.
//!
//! The wait-until-terminal loop measures elapsed time and sleeps between
//! polls through this trait, so tests can drive simulated time instead of
//! waiting for real delays.

use std::time::{Duration, Instant};

use async_trait::async_trait;

/// A source of time and cooperative sleep.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Real clock backed by the tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
