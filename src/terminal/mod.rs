//! Terminal access for the countdown.
//!
//! The terminal is an explicit context object rather than global state:
//!
//! - `Screen`: the capabilities the countdown needs (clear, draw, poll a key)
//! - `TerminalScreen`: the crossterm implementation
//! - `TerminalSession`: RAII guard for raw mode, alternate screen and cursor
//! - `prompt`: the boxed duration entry field
//! - `font`: FIGlet rendering for the big display
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   lock   ┌──────────────────────┐
//! │ CountdownEngine  │────────▶│                      │
//! └──────────────────┘          │ Arc<Mutex<Screen>>   │
//! ┌──────────────────┐   lock   │                      │
//! │   KeyListener    │────────▶│                      │
//! └──────────────────┘          └──────────────────────┘
//! ```

mod error;
pub mod font;
mod mock;
pub mod prompt;
mod screen;
mod session;

use crossterm::event::KeyEvent;

pub use error::TerminalError;
pub use mock::MockScreen;
pub use prompt::{ask_duration, LineInput};
pub use screen::{center, Layout, TerminalScreen};
pub use session::TerminalSession;

/// Display and input surface used by the countdown.
///
/// Reads and writes must not overlap; callers share a screen behind a
/// mutex.
pub trait Screen: Send {
    /// Clears the display. May take effect only at the next `render`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written.
    fn clear(&mut self) -> Result<(), TerminalError>;

    /// Draws a duration label centered on the display.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Overflow` if the label does not fit, or an
    /// I/O error from the terminal.
    fn render(&mut self, label: &str) -> Result<(), TerminalError>;

    /// Returns a pending key press without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source cannot be read.
    fn poll_key(&mut self) -> Result<Option<KeyEvent>, TerminalError>;
}
