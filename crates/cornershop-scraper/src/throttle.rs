//! Fixed pre-request delay.
//!
//! The search API has no published rate limit. Callers that issue many
//! searches in a row wait a fixed interval before each one; the wait lives
//! here, outside [`crate::CornershopClient`], so a single search is never
//! delayed implicitly.

use std::time::Duration;

/// A fixed delay awaited before each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// No delay at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps for the configured delay. Returns immediately when it is zero.
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::debug!(delay_ms = self.delay.as_millis(), "throttling before request");
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_delay_returns_immediately() {
        let started = tokio::time::Instant::now();
        Throttle::none().wait().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_configured_delay() {
        let started = tokio::time::Instant::now();
        Throttle::from_secs(2).wait().await;
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[test]
    fn from_secs_sets_delay() {
        assert_eq!(Throttle::from_secs(3).delay(), Duration::from_secs(3));
        assert!(Throttle::none().delay().is_zero());
    }
}
