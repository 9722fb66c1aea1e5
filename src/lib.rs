//! Terminal Countdown Timer Library
//!
//! This library provides the core functionality for the timerpal CLI.
//! It includes:
//! - Duration text parsing and compact formatting
//! - Countdown engine with a concurrent quit-key listener
//! - Terminal screen, big-digit font and the duration prompt
//! - Completion alarm: desktop notification and sound
//! - JSON configuration and CLI command parsing
//! - Log output held back while the countdown owns the screen

pub mod alarm;
pub mod cli;
pub mod config;
pub mod countdown;
pub mod duration;
pub mod logging;
pub mod notification;
pub mod sound;
pub mod terminal;

// Re-export commonly used types for convenience
pub use alarm::{Alarm, MockAlarm, SystemAlarm};
pub use config::{ConfigError, TimerConfig};
pub use countdown::{
    CancelSignal, Clock, CountdownEngine, CountdownError, CountdownOutcome, EngineSettings,
    KeyListener, ListenerSettings, ManualClock, SystemClock,
};
pub use duration::{format_duration, parse_duration, parse_nonzero};

// Re-export notification types
pub use notification::{
    DesktopNotifier, MockNotificationSender, NotificationContent, NotificationError,
    NotificationSender,
};

// Re-export sound types
pub use sound::{
    get_default_sound, resolve_sound, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer,
    SoundSource,
};

// Re-export terminal types
pub use terminal::{MockScreen, Screen, TerminalError, TerminalScreen, TerminalSession};
