//! Countdown engine.
//!
//! Runs one countdown from a duration to zero or cancellation:
//! - Deadline fixed at start; remaining time always recomputed from it
//! - Tick schedule advanced by exactly one second per iteration
//! - Waits on the cancellation channel until the next tick
//! - Oversized labels fall back to a single glyph
//! - The key listener is always joined before `run` returns

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver};
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::listener::{KeyListener, ListenerSettings};
use super::{CancelSignal, CountdownError};
use crate::alarm::Alarm;
use crate::duration::format_duration;
use crate::terminal::Screen;

/// Interval between two scheduled redraws.
pub const TICK: Duration = Duration::from_secs(1);

// ============================================================================
// CountdownOutcome
// ============================================================================

/// How a countdown run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// The deadline passed and the alarm was rung.
    Completed,
    /// The user pressed the quit key.
    Cancelled,
}

impl CountdownOutcome {
    /// Returns the string representation of the outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownOutcome::Completed => "completed",
            CountdownOutcome::Cancelled => "cancelled",
        }
    }
}

// ============================================================================
// EngineSettings
// ============================================================================

/// Tunables for a countdown run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Key listener configuration.
    pub listener: ListenerSettings,
    /// Short pause at the top of every iteration.
    pub settle: Duration,
    /// Drawn instead of a label that does not fit the screen.
    pub fallback_glyph: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            listener: ListenerSettings::default(),
            settle: Duration::from_millis(10),
            fallback_glyph: "E".to_string(),
        }
    }
}

/// Whole seconds from `now` until `deadline`, rounded up, never below zero.
#[must_use]
pub fn remaining_seconds(deadline: Instant, now: Instant) -> u64 {
    let left = deadline.saturating_duration_since(now);
    left.as_secs() + u64::from(left.subsec_nanos() > 0)
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Drives a countdown on a shared screen.
pub struct CountdownEngine<S, C> {
    screen: Arc<Mutex<S>>,
    clock: C,
    settings: EngineSettings,
}

impl<S, C> CountdownEngine<S, C>
where
    S: Screen + 'static,
    C: Clock,
{
    /// Creates an engine drawing on `screen` and timed by `clock`.
    pub fn new(screen: Arc<Mutex<S>>, clock: C, settings: EngineSettings) -> Self {
        Self {
            screen,
            clock,
            settings,
        }
    }

    /// Counts down `seconds`, ringing `alarm` if the deadline is reached.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal fails for a reason other than a
    /// label that does not fit, or if the key listener cannot be started
    /// or panics. The listener is stopped before any error is returned.
    pub fn run(&self, seconds: u64, alarm: &dyn Alarm) -> Result<CountdownOutcome, CountdownError> {
        let start = self.clock.now();
        let deadline = start + Duration::from_secs(seconds);
        info!("Countdown started: {}", format_duration(seconds));

        let (cancel_tx, cancel_rx) = bounded(1);
        // The engine keeps its own sender so the channel stays connected
        // even if the listener thread dies.
        let listener =
            KeyListener::spawn(Arc::clone(&self.screen), cancel_tx.clone(), self.settings.listener)?;

        let result = self.count_down(start, deadline, &cancel_rx, alarm);

        let stopped = shutdown(listener, &cancel_rx);
        drop(cancel_tx);

        let outcome = result?;
        stopped?;
        info!("Countdown {}", outcome.as_str());
        Ok(outcome)
    }

    fn count_down(
        &self,
        start: Instant,
        deadline: Instant,
        cancel_rx: &Receiver<CancelSignal>,
        alarm: &dyn Alarm,
    ) -> Result<CountdownOutcome, CountdownError> {
        let mut sync = start;
        let mut remaining = remaining_seconds(deadline, start);

        while remaining > 0 {
            self.lock_screen()?.clear()?;
            self.clock.pause(self.settings.settle);

            // Scheduled from the previous tick, not from now, so slow
            // frames do not push later ticks back.
            let next_tick = sync + TICK;
            if next_tick > self.clock.now()
                && self.clock.wait_for_signal(cancel_rx, next_tick).is_some()
            {
                return Ok(CountdownOutcome::Cancelled);
            }
            sync = next_tick;

            remaining = remaining_seconds(deadline, self.clock.now());
            debug!("Tick: {} seconds remaining", remaining);
            self.render(remaining)?;

            if remaining == 0 {
                alarm.ring();
                return Ok(CountdownOutcome::Completed);
            }
        }

        Ok(CountdownOutcome::Completed)
    }

    fn render(&self, remaining: u64) -> Result<(), CountdownError> {
        let label = format_duration(remaining);
        let mut screen = self.lock_screen()?;

        match screen.render(&label) {
            Err(e) if e.is_overflow() => {
                debug!("Label {:?} does not fit: {}", label, e);
                match screen.render(&self.settings.fallback_glyph) {
                    Err(e) if e.is_overflow() => {
                        warn!("Fallback glyph does not fit: {}", e);
                        Ok(())
                    }
                    other => other.map_err(CountdownError::from),
                }
            }
            other => other.map_err(CountdownError::from),
        }
    }

    fn lock_screen(&self) -> Result<MutexGuard<'_, S>, CountdownError> {
        self.screen.lock().map_err(|_| CountdownError::ScreenPoisoned)
    }
}

/// Stops the listener and discards any cancellation left in the channel.
fn shutdown(listener: KeyListener, cancel_rx: &Receiver<CancelSignal>) -> Result<(), CountdownError> {
    let stopped = listener.stop();
    let discarded = cancel_rx.try_iter().count();
    if discarded > 0 {
        debug!("Discarded {} pending cancellation signal(s)", discarded);
    }
    stopped
}
