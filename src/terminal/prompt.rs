//! Interactive duration prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::error::TerminalError;
use crate::duration::parse_nonzero;

/// Width of the text entry field in columns.
pub const INPUT_WIDTH: usize = 30;

/// A source of whole lines of user input.
pub trait LineInput {
    /// Reads one line, returning when the user confirms it.
    ///
    /// # Errors
    ///
    /// Returns `TerminalError::Aborted` if the user leaves the prompt, or
    /// an I/O error from the terminal.
    fn read_line(&mut self) -> Result<String, TerminalError>;
}

/// What the prompt should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Keep editing.
    Continue,
    /// The line is complete.
    Submit,
    /// The user wants out.
    Abort,
}

/// Applies a key press to the prompt buffer.
///
/// The buffer holds at most `INPUT_WIDTH - 1` characters so the caret still
/// fits in the field.
pub fn apply_key(buffer: &mut String, key: KeyEvent) -> PromptAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => PromptAction::Abort,
            _ => PromptAction::Continue,
        };
    }

    match key.code {
        KeyCode::Enter => PromptAction::Submit,
        KeyCode::Esc => PromptAction::Abort,
        KeyCode::Backspace => {
            buffer.pop();
            PromptAction::Continue
        }
        KeyCode::Char(c) if !c.is_control() && buffer.chars().count() < INPUT_WIDTH - 1 => {
            buffer.push(c);
            PromptAction::Continue
        }
        _ => PromptAction::Continue,
    }
}

/// Prompts until the user enters a non-zero duration.
///
/// Invalid or empty input is re-prompted silently.
///
/// # Errors
///
/// Propagates any error from `input`, including `TerminalError::Aborted`.
pub fn ask_duration<I: LineInput + ?Sized>(input: &mut I) -> Result<u64, TerminalError> {
    loop {
        let line = input.read_line()?;
        match parse_nonzero(&line) {
            Some(seconds) => {
                debug!("Duration entered: {} seconds", seconds);
                return Ok(seconds);
            }
            None => debug!("Invalid duration input {:?}, prompting again", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    // ------------------------------------------------------------------------
    // apply_key Tests
    // ------------------------------------------------------------------------

    mod apply_key_tests {
        use super::*;

        #[test]
        fn test_typing_appends() {
            let mut buffer = String::new();
            for c in "5m".chars() {
                assert_eq!(apply_key(&mut buffer, key(KeyCode::Char(c))), PromptAction::Continue);
            }
            assert_eq!(buffer, "5m");
        }

        #[test]
        fn test_backspace_removes_last() {
            let mut buffer = "10s".to_string();
            apply_key(&mut buffer, key(KeyCode::Backspace));
            assert_eq!(buffer, "10");
        }

        #[test]
        fn test_backspace_on_empty() {
            let mut buffer = String::new();
            assert_eq!(apply_key(&mut buffer, key(KeyCode::Backspace)), PromptAction::Continue);
            assert!(buffer.is_empty());
        }

        #[test]
        fn test_enter_submits() {
            let mut buffer = "1h".to_string();
            assert_eq!(apply_key(&mut buffer, key(KeyCode::Enter)), PromptAction::Submit);
            assert_eq!(buffer, "1h");
        }

        #[test]
        fn test_escape_aborts() {
            let mut buffer = String::new();
            assert_eq!(apply_key(&mut buffer, key(KeyCode::Esc)), PromptAction::Abort);
        }

        #[test]
        fn test_ctrl_c_aborts() {
            let mut buffer = String::new();
            assert_eq!(apply_key(&mut buffer, ctrl('c')), PromptAction::Abort);
            assert!(buffer.is_empty());
        }

        #[test]
        fn test_other_ctrl_keys_ignored() {
            let mut buffer = String::new();
            assert_eq!(apply_key(&mut buffer, ctrl('a')), PromptAction::Continue);
            assert!(buffer.is_empty());
        }

        #[test]
        fn test_buffer_is_bounded() {
            let mut buffer = String::new();
            for _ in 0..100 {
                apply_key(&mut buffer, key(KeyCode::Char('9')));
            }
            assert_eq!(buffer.len(), INPUT_WIDTH - 1);
        }

        #[test]
        fn test_arrow_keys_ignored() {
            let mut buffer = "5".to_string();
            assert_eq!(apply_key(&mut buffer, key(KeyCode::Left)), PromptAction::Continue);
            assert_eq!(buffer, "5");
        }
    }

    // ------------------------------------------------------------------------
    // ask_duration Tests
    // ------------------------------------------------------------------------

    mod ask_duration_tests {
        use super::*;

        struct ScriptedInput {
            lines: VecDeque<Result<String, TerminalError>>,
            reads: usize,
        }

        impl ScriptedInput {
            fn new(lines: Vec<Result<String, TerminalError>>) -> Self {
                Self {
                    lines: lines.into(),
                    reads: 0,
                }
            }
        }

        impl LineInput for ScriptedInput {
            fn read_line(&mut self) -> Result<String, TerminalError> {
                self.reads += 1;
                self.lines.pop_front().unwrap_or(Err(TerminalError::Aborted))
            }
        }

        #[test]
        fn test_valid_first_try() {
            let mut input = ScriptedInput::new(vec![Ok("1m 30s".to_string())]);
            assert_eq!(ask_duration(&mut input).unwrap(), 90);
            assert_eq!(input.reads, 1);
        }

        #[test]
        fn test_reprompts_on_invalid_input() {
            let mut input = ScriptedInput::new(vec![
                Ok(String::new()),
                Ok("later".to_string()),
                Ok("0s".to_string()),
                Ok("5s".to_string()),
            ]);
            assert_eq!(ask_duration(&mut input).unwrap(), 5);
            assert_eq!(input.reads, 4);
        }

        #[test]
        fn test_abort_propagates() {
            let mut input = ScriptedInput::new(vec![Ok("x".to_string()), Err(TerminalError::Aborted)]);
            let err = ask_duration(&mut input).unwrap_err();
            assert!(matches!(err, TerminalError::Aborted));
        }
    }
}
