//! Terminal error types.

use thiserror::Error;

/// Errors that can occur while driving the terminal.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// The text does not fit in the visible area.
    #[error("表示領域が不足しています: {width}x{height} の表示に {cols}x{rows} の端末")]
    Overflow {
        /// Width of the text in columns.
        width: usize,
        /// Height of the text in rows.
        height: usize,
        /// Terminal width in columns.
        cols: u16,
        /// Terminal height in rows.
        rows: u16,
    },

    /// The user left the duration prompt (Esc or Ctrl-C).
    #[error("入力が中断されました")]
    Aborted,

    /// The bundled display font could not be loaded.
    #[error("フォントを読み込めません: {0}")]
    Font(String),

    /// Underlying terminal I/O failed.
    #[error("端末の入出力に失敗しました: {0}")]
    Io(#[from] std::io::Error),
}

impl TerminalError {
    /// Returns true if the error is recoverable by drawing something smaller.
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Overflow { .. } => "端末ウィンドウを大きくしてください",
            Self::Aborted => "もう一度起動してください",
            Self::Font(_) => "再インストールしてください",
            Self::Io(_) => "対話可能な端末で実行してください",
        }
    }
}
