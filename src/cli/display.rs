//! Display utilities for the timer CLI.
//!
//! Everything here prints to the normal screen, after the terminal session
//! has been restored.

use crate::countdown::CountdownOutcome;
use crate::duration::format_duration;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows how the countdown ended.
    ///
    /// Cancellation is silent; only a completed run prints a line.
    pub fn show_outcome(outcome: CountdownOutcome, seconds: u64) {
        if let Some(message) = Self::outcome_message(outcome, seconds) {
            println!("{}", message);
        }
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Shows how to fix the last error.
    pub fn show_hint(hint: &str) {
        eprintln!("ヒント: {}", hint);
    }

    /// Builds the line printed for an outcome, if any.
    fn outcome_message(outcome: CountdownOutcome, seconds: u64) -> Option<String> {
        match outcome {
            CountdownOutcome::Completed => {
                Some(format!("* タイマーが完了しました ({})", format_duration(seconds)))
            }
            CountdownOutcome::Cancelled => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
