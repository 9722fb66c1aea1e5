//! Background key listener.
//!
//! Polls the shared screen for key presses and posts a [`CancelSignal`]
//! when the quit key is seen. Between polls it waits on its stop channel,
//! so a stop request is observed within one polling interval.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::{CancelSignal, CountdownError};
use crate::terminal::Screen;

/// Key listener configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerSettings {
    /// Key that cancels the countdown (matched case-insensitively).
    pub quit_key: char,
    /// Pause between polls.
    pub poll_interval: Duration,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            quit_key: 'q',
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// Returns true if `key` should cancel the countdown.
///
/// Ctrl-C always cancels, since raw mode swallows the interrupt signal.
#[must_use]
pub fn is_quit_key(key: &KeyEvent, quit_key: char) -> bool {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => c == 'c',
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&quit_key),
        _ => false,
    }
}

/// Handle to a running listener thread.
pub struct KeyListener {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl KeyListener {
    /// Starts polling `screen` on a new thread.
    ///
    /// # Errors
    ///
    /// Returns `CountdownError::ListenerSpawn` if the thread cannot be
    /// created.
    pub fn spawn<S>(
        screen: Arc<Mutex<S>>,
        signals: Sender<CancelSignal>,
        settings: ListenerSettings,
    ) -> Result<Self, CountdownError>
    where
        S: Screen + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(0);

        let handle = thread::Builder::new()
            .name("key-listener".to_string())
            .spawn(move || listen(&screen, &signals, &stop_rx, settings))
            .map_err(CountdownError::ListenerSpawn)?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stops the listener and waits for the thread to exit.
    ///
    /// # Errors
    ///
    /// Returns `CountdownError::ListenerPanicked` if the thread panicked.
    pub fn stop(mut self) -> Result<(), CountdownError> {
        self.shutdown()
    }

    /// Returns true while the thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn shutdown(&mut self) -> Result<(), CountdownError> {
        // Disconnecting the stop channel is the stop request.
        self.stop_tx.take();

        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| CountdownError::ListenerPanicked),
            None => Ok(()),
        }
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

impl std::fmt::Debug for KeyListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyListener")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

fn listen<S: Screen>(
    screen: &Mutex<S>,
    signals: &Sender<CancelSignal>,
    stop_rx: &Receiver<()>,
    settings: ListenerSettings,
) {
    debug!("Key listener started");

    loop {
        if let Some(key) = read_key(screen) {
            if is_quit_key(&key, settings.quit_key) {
                match signals.try_send(CancelSignal) {
                    Ok(()) => debug!("Quit key pressed"),
                    // A cancellation is already pending.
                    Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
        }

        select! {
            recv(stop_rx) -> _ => break,
            default(settings.poll_interval) => {}
        }
    }

    debug!("Key listener stopped");
}

/// Reads one key, treating every failure as "no key".
fn read_key<S: Screen>(screen: &Mutex<S>) -> Option<KeyEvent> {
    let Ok(mut screen) = screen.lock() else {
        debug!("Screen lock poisoned, skipping key poll");
        return None;
    };

    match screen.poll_key() {
        Ok(key) => key,
        Err(e) => {
            debug!("Key read failed: {}", e);
            None
        }
    }
}
