//! In-memory screen for tests.

use std::collections::{HashSet, VecDeque};
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::error::TerminalError;
use super::Screen;

/// Mock screen that records draws and replays scripted key presses.
#[derive(Debug, Default)]
pub struct MockScreen {
    renders: Vec<String>,
    clears: usize,
    polls: usize,
    keys: VecDeque<KeyEvent>,
    read_errors: usize,
    overflow_labels: HashSet<String>,
    fail_render_at: Option<usize>,
    render_attempts: usize,
}

impl MockScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a plain character key press.
    pub fn push_char(&mut self, c: char) {
        self.push_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    /// Queues a key press.
    pub fn push_key(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    /// Makes the next `count` polls fail with an I/O error.
    pub fn fail_reads(&mut self, count: usize) {
        self.read_errors = count;
    }

    /// Makes rendering `label` report that it does not fit.
    pub fn overflow_on(&mut self, label: impl Into<String>) {
        self.overflow_labels.insert(label.into());
    }

    /// Makes the `n`th render attempt (0-based) fail with an I/O error.
    pub fn fail_render_at(&mut self, n: usize) {
        self.fail_render_at = Some(n);
    }

    /// Labels rendered successfully, in order.
    #[must_use]
    pub fn renders(&self) -> &[String] {
        &self.renders
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    #[must_use]
    pub fn poll_count(&self) -> usize {
        self.polls
    }

    /// Key presses not yet consumed by a poll.
    #[must_use]
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Screen for MockScreen {
    fn clear(&mut self) -> Result<(), TerminalError> {
        self.clears += 1;
        Ok(())
    }

    fn render(&mut self, label: &str) -> Result<(), TerminalError> {
        let attempt = self.render_attempts;
        self.render_attempts += 1;

        if self.fail_render_at == Some(attempt) {
            return Err(io::Error::other("mock render failure").into());
        }
        if self.overflow_labels.contains(label) {
            return Err(TerminalError::Overflow {
                width: label.len(),
                height: 1,
                cols: 0,
                rows: 0,
            });
        }
        self.renders.push(label.to_string());
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<KeyEvent>, TerminalError> {
        self.polls += 1;
        if self.read_errors > 0 {
            self.read_errors -= 1;
            return Err(io::Error::other("mock read failure").into());
        }
        Ok(self.keys.pop_front())
    }
}
