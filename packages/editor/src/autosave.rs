//! # Autosave Status
//!
//! Debounced "saving / saved" indicator. Each change moves the status to
//! `Saving` and pushes the deadline out by the delay; once a poll sees the
//! deadline pass with no newer change, the status settles on `Saved`.
//!
//! Time comes from a [`Clock`] so tests can step it by hand.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Monotonic time source
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall clock, measured from its own creation
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// Nothing changed yet
    Idle,
    Saving,
    Saved,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveStatus::Idle => write!(f, "idle"),
            SaveStatus::Saving => write!(f, "saving"),
            SaveStatus::Saved => write!(f, "saved"),
        }
    }
}

/// Cancellable debounce timer behind the status indicator
pub struct Autosave {
    clock: Arc<dyn Clock>,
    delay: Duration,
    status: SaveStatus,
    /// When the pending change settles; `None` when no timer is armed
    deadline: Option<Duration>,
    cancelled: bool,
}

impl Autosave {
    pub fn new(clock: Arc<dyn Clock>, delay: Duration) -> Self {
        Self {
            clock,
            delay,
            status: SaveStatus::Idle,
            deadline: None,
            cancelled: false,
        }
    }

    /// Record a change: status becomes `Saving` and the timer restarts
    pub fn touch(&mut self) {
        if self.cancelled {
            return;
        }
        let deadline = self.clock.now() + self.delay;
        self.deadline = Some(deadline);
        if self.status != SaveStatus::Saving {
            debug!(from = %self.status, "Autosave pending");
        }
        self.status = SaveStatus::Saving;
    }

    /// Settle to `Saved` if the timer expired. Returns the current status.
    pub fn poll(&mut self) -> SaveStatus {
        if let Some(deadline) = self.deadline {
            if self.clock.now() >= deadline {
                self.deadline = None;
                self.status = SaveStatus::Saved;
                debug!("Autosave settled");
            }
        }
        self.status
    }

    /// Disarm the timer for good. Later touches and polls change nothing.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            debug!("Autosave timer cancelled");
        }
        self.cancelled = true;
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl fmt::Debug for Autosave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autosave")
            .field("delay", &self.delay)
            .field("status", &self.status)
            .field("deadline", &self.deadline)
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn autosave() -> (ManualClock, Autosave) {
        let clock = ManualClock::new();
        let autosave = Autosave::new(Arc::new(clock.clone()), Duration::from_millis(800));
        (clock, autosave)
    }

    #[test]
    fn test_starts_idle() {
        let (_, mut autosave) = autosave();
        assert_eq!(autosave.poll(), SaveStatus::Idle);
    }

    #[test]
    fn test_settles_after_delay() {
        let (clock, mut autosave) = autosave();
        autosave.touch();
        assert_eq!(autosave.poll(), SaveStatus::Saving);

        clock.advance(Duration::from_millis(799));
        assert_eq!(autosave.poll(), SaveStatus::Saving);

        clock.advance(Duration::from_millis(1));
        assert_eq!(autosave.poll(), SaveStatus::Saved);
        assert!(!autosave.is_pending());
    }

    #[test]
    fn test_rapid_changes_coalesce() {
        let (clock, mut autosave) = autosave();
        let mut observed = Vec::new();

        for _ in 0..5 {
            autosave.touch();
            clock.advance(Duration::from_millis(500));
            observed.push(autosave.poll());
        }
        clock.advance(Duration::from_millis(300));
        observed.push(autosave.poll());

        assert_eq!(observed.iter().filter(|s| **s == SaveStatus::Saved).count(), 1);
        assert_eq!(observed.last(), Some(&SaveStatus::Saved));
    }

    #[test]
    fn test_cancel_prevents_stale_update() {
        let (clock, mut autosave) = autosave();
        autosave.touch();
        autosave.cancel();

        clock.advance(Duration::from_secs(10));
        assert_eq!(autosave.poll(), SaveStatus::Saving);

        autosave.touch();
        assert!(!autosave.is_pending());
    }

    #[test]
    fn test_clones_of_manual_clock_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(Duration::from_millis(42));
        assert_eq!(other.now(), Duration::from_millis(42));
    }
}
