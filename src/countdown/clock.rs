//! Time source for the countdown.
//!
//! The engine never calls `Instant::now` or sleeps directly; it goes through
//! a [`Clock`] so runs can be driven by a manual clock in tests.

use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use super::CancelSignal;

/// Time source and timed wait used by the countdown engine.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Blocks for `duration`.
    fn pause(&self, duration: Duration);

    /// Blocks until `until` or until a signal arrives on `signals`,
    /// whichever comes first.
    ///
    /// Returns the signal if one arrived.
    fn wait_for_signal(&self, signals: &Receiver<CancelSignal>, until: Instant)
        -> Option<CancelSignal>;
}

// ============================================================================
// SystemClock
// ============================================================================

/// Wall-clock time with real blocking waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }

    fn wait_for_signal(
        &self,
        signals: &Receiver<CancelSignal>,
        until: Instant,
    ) -> Option<CancelSignal> {
        signals.recv_deadline(until).ok()
    }
}

// ============================================================================
// ManualClock
// ============================================================================

/// Clock that only advances when the engine waits on it.
///
/// `pause` and a timed-out `wait_for_signal` jump straight to the target
/// instant. Before timing out, `wait_for_signal` gives other threads up to
/// `grace` of real time to deliver a signal.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
    grace: Duration,
}

impl ManualClock {
    /// Creates a clock starting at the current instant with no grace period.
    #[must_use]
    pub fn new() -> Self {
        Self::with_grace(Duration::ZERO)
    }

    /// Creates a clock whose waits allow `grace` of real time for signals.
    #[must_use]
    pub fn with_grace(grace: Duration) -> Self {
        Self {
            now: Mutex::new(Instant::now()),
            grace,
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    fn advance_to(&self, target: Instant) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        if target > *now {
            *now = target;
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn pause(&self, duration: Duration) {
        self.advance(duration);
    }

    fn wait_for_signal(
        &self,
        signals: &Receiver<CancelSignal>,
        until: Instant,
    ) -> Option<CancelSignal> {
        match signals.recv_timeout(self.grace) {
            Ok(signal) => Some(signal),
            Err(_) => {
                self.advance_to(until);
                None
            }
        }
    }
}
