//! Countdown core.
//!
//! This module contains the countdown loop and its concurrent key listener:
//! - `engine`: deadline, tick schedule, rendering and completion
//! - `listener`: background thread turning the quit key into a signal
//! - `clock`: time source, swappable for a manual clock in tests

pub mod clock;
pub mod engine;
mod error;
pub mod listener;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{CountdownEngine, CountdownOutcome, EngineSettings};
pub use error::CountdownError;
pub use listener::{KeyListener, ListenerSettings};

/// Request from the key listener to end the countdown early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelSignal;
