//! Step timing and cooperative cancellation
//!
//! Animated primitives are the only suspension points of the engine. They all
//! go through a `Pacer`, which sleeps for the configured delay and checks the
//! cancel flag on both sides of the sleep.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::{Result, SortError};

/// Default pause around each animated swap or set
pub const DELAY: Duration = Duration::from_millis(40);

/// Default pause once an animated sort has finished
pub const END_DELAY: Duration = Duration::from_millis(600);

/// Pause lengths for animated runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    delay: Duration,
    end_delay: Duration,
}

impl Timing {
    /// Create a timing, both durations must be positive
    pub fn new(delay: Duration, end_delay: Duration) -> Result<Self> {
        if delay.is_zero() || end_delay.is_zero() {
            return Err(SortError::Configuration(format!(
                "delays must be positive (delay={:?}, end_delay={:?})",
                delay, end_delay
            )));
        }
        Ok(Self { delay, end_delay })
    }

    /// Timing from millisecond values, as stored in settings
    pub fn from_millis(delay_ms: u64, end_delay_ms: u64) -> Result<Self> {
        Self::new(
            Duration::from_millis(delay_ms),
            Duration::from_millis(end_delay_ms),
        )
    }

    /// Per-step pause
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Completion pause before states are reset
    pub fn end_delay(&self) -> Duration {
        self.end_delay
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            delay: DELAY,
            end_delay: END_DELAY,
        }
    }
}

/// Shared cancel handle
///
/// Clone this to the controller. Raising it makes the next suspension point
/// of the running sort fail with `SortError::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }

    /// Lower the flag so the same handle can guard the next run
    pub fn reset(&self) {
        self.inner.store(false, Ordering::SeqCst);
    }
}

/// Suspension driver owned by a sequence
#[derive(Debug, Clone, Default)]
pub struct Pacer {
    timing: Timing,
    cancel: CancelFlag,
}

impl Pacer {
    pub fn new(timing: Timing, cancel: CancelFlag) -> Self {
        Self { timing, cancel }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    pub fn set_cancel_flag(&mut self, cancel: CancelFlag) {
        self.cancel = cancel;
    }

    /// Fail fast if the run has been cancelled
    pub fn check(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(SortError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Suspend for one step
    pub async fn step(&self) -> Result<()> {
        self.pause(self.timing.delay).await
    }

    /// Suspend for the completion pause
    pub async fn finish(&self) -> Result<()> {
        self.pause(self.timing.end_delay).await
    }

    async fn pause(&self, duration: Duration) -> Result<()> {
        self.check()?;
        tokio::time::sleep(duration).await;
        self.check()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_rejected() {
        assert!(Timing::from_millis(0, 100).is_err());
        assert!(Timing::from_millis(10, 0).is_err());
        let timing = Timing::from_millis(10, 100).unwrap();
        assert_eq!(timing.delay(), Duration::from_millis(10));
        assert_eq!(timing.end_delay(), Duration::from_millis(100));
        assert!(Timing::new(Duration::ZERO, END_DELAY).is_err());
    }

    #[test]
    fn test_default_timing() {
        let timing = Timing::default();
        assert_eq!(timing.delay(), DELAY);
        assert_eq!(timing.end_delay(), END_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_step_sleeps_for_delay() {
        let pacer = Pacer::new(Timing::from_millis(25, 300).unwrap(), CancelFlag::new());
        let start = tokio::time::Instant::now();
        pacer.step().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(25));
        pacer.finish().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(325));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_pacer_refuses_to_step() {
        let cancel = CancelFlag::new();
        let pacer = Pacer::new(Timing::default(), cancel.clone());
        cancel.cancel();
        assert_eq!(pacer.step().await, Err(SortError::Cancelled));

        cancel.reset();
        assert!(pacer.step().await.is_ok());
    }
}
