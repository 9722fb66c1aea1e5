//! Sound playback for the completion alert.
//!
//! This module provides audio notification capabilities, including:
//!
//! - Alert sound discovery in the desktop sound directories
//! - A generated tone when no sound file can be played
//! - Blocking or detached playback
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────────┐
//! │   SoundSource    │────▶│ Sound file           │
//! │                  │     │ (/usr/share/sounds)  │
//! │                  │     ├──────────────────────┤
//! │                  │────▶│ Generated tone       │
//! └──────────────────┘     │ (fallback)           │
//!                          └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use timerpal::sound::{RodioSoundPlayer, SoundSource, get_default_sound};
//!
//! let player = RodioSoundPlayer::new(false).expect("audio init");
//! player.play(&get_default_sound()).expect("playback failed");
//!
//! let source = SoundSource::file("/usr/share/sounds/gnome/default/alerts/sonar.ogg");
//! player.play(&source).expect("playback failed");
//! ```

mod error;
mod player;
mod source;
mod tone;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{
    discover_system_sounds, get_default_sound, resolve_sound, SoundSource,
};
pub use tone::{fallback_tone, TONE_DURATION, TONE_FREQUENCY_HZ};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::Sink(rodio::PlayError::NoDevice));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for std::sync::Arc<P> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }
}
