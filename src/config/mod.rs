//! Configuration for the timer.
//!
//! Settings come from an optional JSON file, then command line overrides:
//! - `--config <PATH>`, or `$XDG_CONFIG_HOME/timerpal/config.json`
//! - A missing file means defaults; a broken file is an error

mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::countdown::{EngineSettings, ListenerSettings};
use crate::notification::DEFAULT_ICON;

pub use error::ConfigError;

/// Sound played on completion when nothing else is configured.
pub const DEFAULT_SOUND: &str = "/usr/share/sounds/gnome/default/alerts/sonar.ogg";

// ============================================================================
// TimerConfig
// ============================================================================

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Key that cancels a running countdown (case-insensitive)
    pub quit_key: char,
    /// Pause between key polls in milliseconds (1-1000)
    pub poll_interval_ms: u64,
    /// Pause at the top of every countdown iteration in milliseconds (0-500)
    pub settle_ms: u64,
    /// Drawn when the remaining time does not fit the terminal
    pub fallback_glyph: String,
    /// Sound file played on completion; `None` picks a system alert sound
    pub sound: Option<PathBuf>,
    /// Whether to play a sound on completion
    pub sound_enabled: bool,
    /// Whether to raise a desktop notification on completion
    pub notify_enabled: bool,
    /// Icon name or path for the notification
    pub notification_icon: String,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            quit_key: 'q',
            poll_interval_ms: 10,
            settle_ms: 10,
            fallback_glyph: "E".to_string(),
            sound: Some(PathBuf::from(DEFAULT_SOUND)),
            sound_enabled: true,
            notify_enabled: true,
            notification_icon: DEFAULT_ICON.to_string(),
        }
    }
}

impl TimerConfig {
    /// Returns the default configuration file location, if one can be
    /// determined.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("timerpal").join("config.json"))
    }

    /// Loads the configuration from `path`, or the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the resulting configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        let config = match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_json(&text).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns the serde error if `text` is not valid.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.quit_key.is_ascii_alphanumeric() {
            return Err(ConfigError::Invalid(format!(
                "quit_key は英数字で指定してください: {:?}",
                self.quit_key
            )));
        }
        if !(1..=1000).contains(&self.poll_interval_ms) {
            return Err(ConfigError::Invalid(
                "poll_interval_ms は1-1000の範囲で指定してください".to_string(),
            ));
        }
        if self.settle_ms > 500 {
            return Err(ConfigError::Invalid(
                "settle_ms は0-500の範囲で指定してください".to_string(),
            ));
        }
        if self.fallback_glyph.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "fallback_glyph を空にすることはできません".to_string(),
            ));
        }
        Ok(())
    }

    /// Disables the completion sound.
    #[must_use]
    pub fn without_sound(mut self) -> Self {
        self.sound_enabled = false;
        self
    }

    /// Disables the desktop notification.
    #[must_use]
    pub fn without_notification(mut self) -> Self {
        self.notify_enabled = false;
        self
    }

    /// Uses `path` as the completion sound.
    #[must_use]
    pub fn with_sound(mut self, path: impl Into<PathBuf>) -> Self {
        self.sound = Some(path.into());
        self
    }

    /// Returns the countdown engine settings derived from this configuration.
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            listener: ListenerSettings {
                quit_key: self.quit_key,
                poll_interval: Duration::from_millis(self.poll_interval_ms),
            },
            settle: Duration::from_millis(self.settle_ms),
            fallback_glyph: self.fallback_glyph.clone(),
        }
    }
}
