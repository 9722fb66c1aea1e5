//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library for cross-platform sound playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;
use super::tone::fallback_tone;

/// A sound player that uses rodio for audio playback.
///
/// By default playback is detached and continues in the background. With
/// [`wait_for_end`](Self::wait_for_end) set, `play` blocks until the sound
/// finishes, which keeps it from being cut off when the program exits right
/// after the alert.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// Whether sound playback is disabled.
    disabled: AtomicBool,
    /// Whether `play` blocks until the sound has finished.
    wait_for_end: bool,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Arguments
    ///
    /// * `disabled` - If true, all sound playback will be silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::NoOutput` if no audio output device is
    /// available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(SoundError::NoOutput)?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
            wait_for_end: false,
        })
    }

    /// Makes `play` block until the sound has finished.
    #[must_use]
    pub fn wait_for_end(mut self, wait: bool) -> Self {
        self.wait_for_end = wait;
        self
    }

    /// Plays a sound from the given source.
    ///
    /// If a sound file cannot be opened or decoded, the generated tone is
    /// played instead.
    ///
    /// # Errors
    ///
    /// Returns an error if no sink can be created on the output stream.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.disabled.load(Ordering::Relaxed) {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        match source {
            SoundSource::File { path, name } => {
                debug!("Playing sound file: {}", name);
                match self.play_file(path) {
                    Err(e) if e.falls_back_to_tone() => {
                        warn!("Failed to play sound '{}': {}, falling back to tone", name, e);
                        self.play_tone()
                    }
                    other => other,
                }
            }
            SoundSource::Tone => {
                debug!("Playing fallback tone");
                self.play_tone()
            }
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path).map_err(|source| SoundError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SoundError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        self.finish(sink);
        Ok(())
    }

    /// Plays the generated fallback tone.
    fn play_tone(&self) -> Result<(), SoundError> {
        let sink = self.new_sink()?;
        sink.append(fallback_tone());
        self.finish(sink);
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(SoundError::Sink)
    }

    fn finish(&self, sink: Sink) {
        if self.wait_for_end {
            sink.sleep_until_end();
            debug!("Sound playback finished");
        } else {
            sink.detach(); // Non-blocking: sound continues after function returns
            debug!("Sound playback started (detached)");
        }
    }

    /// Returns true if sound playback is currently disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// Enables sound playback.
    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
        debug!("Sound playback enabled");
    }

    /// Disables sound playback.
    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
        debug!("Sound playback disabled");
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .field("wait_for_end", &self.wait_for_end)
            .finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player(disabled: bool) -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new(disabled) {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
