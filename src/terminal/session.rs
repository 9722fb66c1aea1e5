//! Terminal mode setup and guaranteed restoration.

use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use tracing::{debug, warn};

use super::error::TerminalError;

/// RAII guard for the interactive terminal state.
///
/// While alive, the terminal is in raw mode, on the alternate screen, with
/// the cursor hidden. Dropping the guard restores all of it, whichever way
/// the program leaves the scope.
#[derive(Debug)]
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    /// Switches the terminal into countdown mode.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be
    /// entered. Whatever was already changed is restored before returning.
    pub fn start() -> Result<Self, TerminalError> {
        enable_raw_mode()?;

        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            restore();
            return Err(e.into());
        }

        debug!("Terminal session started");
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
        debug!("Terminal session restored");
    }
}

/// Best-effort restoration of every mode `start` touches.
fn restore() {
    if let Err(e) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
        warn!("Failed to leave alternate screen: {}", e);
    }
    if let Err(e) = disable_raw_mode() {
        warn!("Failed to disable raw mode: {}", e);
    }
}
