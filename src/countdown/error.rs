//! Countdown error types.

use thiserror::Error;

use crate::terminal::TerminalError;

/// Errors that end a countdown run.
///
/// Recoverable conditions (a label that does not fit, a failed key read, a
/// failed notification) are handled inside the run and never surface here.
#[derive(Debug, Error)]
pub enum CountdownError {
    /// Drawing to the terminal failed.
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    /// Another thread panicked while holding the screen lock.
    #[error("画面のロックが破損しています")]
    ScreenPoisoned,

    /// The key listener thread could not be started.
    #[error("キー入力スレッドを起動できませんでした: {0}")]
    ListenerSpawn(#[source] std::io::Error),

    /// The key listener thread panicked.
    #[error("キー入力スレッドが異常終了しました")]
    ListenerPanicked,
}
