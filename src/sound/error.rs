//! Sound error types.
//!
//! The alarm only logs these, so each one carries a hint for the user.

use std::path::PathBuf;

use rodio::decoder::DecoderError;
use rodio::{PlayError, StreamError};
use thiserror::Error;

/// Errors returned while resolving or playing the completion sound.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output could be opened.
    #[error("オーディオ出力を開けません: {0}")]
    NoOutput(#[source] StreamError),

    /// The configured sound path does not name a file.
    #[error("サウンドファイルが見つかりません: {}", .0.display())]
    Missing(PathBuf),

    /// The sound file exists but could not be opened.
    #[error("サウンドファイルを開けません ({}): {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not audio rodio can decode.
    #[error("サウンドファイルをデコードできません ({}): {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecoderError,
    },

    /// The output stream refused a new sink.
    #[error("再生を開始できません: {0}")]
    Sink(#[source] PlayError),
}

impl SoundError {
    /// Returns true if the file is at fault, so the tone can play instead.
    #[must_use]
    pub fn falls_back_to_tone(&self) -> bool {
        matches!(self, Self::Missing(_) | Self::Open { .. } | Self::Decode { .. })
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoOutput(_) | Self::Sink(_) => "--no-sound で音を無効にできます",
            Self::Missing(_) | Self::Open { .. } => "--sound で別のファイルを指定してください",
            Self::Decode { .. } => "wav / ogg / flac / mp3 のファイルを指定してください",
        }
    }
}
