//! Completion alarm.
//!
//! Fired once when a countdown reaches zero. Ringing is fire-and-forget:
//! failures are logged and never reach the countdown.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, warn};

use crate::notification::{NotificationContent, NotificationSender};
use crate::sound::{SoundPlayer, SoundSource};

/// Something to do when the countdown completes.
pub trait Alarm {
    /// Signals completion to the user.
    fn ring(&self);
}

// ============================================================================
// SystemAlarm
// ============================================================================

/// Desktop notification followed by a sound.
///
/// Either part may be absent, e.g. when notifications are disabled or no
/// audio device exists.
pub struct SystemAlarm {
    notifier: Option<Box<dyn NotificationSender>>,
    content: NotificationContent,
    player: Option<Box<dyn SoundPlayer>>,
    sound: SoundSource,
}

impl SystemAlarm {
    /// Creates an alarm that shows `content` and does nothing else.
    #[must_use]
    pub fn new(content: NotificationContent) -> Self {
        Self {
            notifier: None,
            content,
            player: None,
            sound: SoundSource::Tone,
        }
    }

    /// Sets the notification sender.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn NotificationSender>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Sets the sound player and the sound it plays.
    #[must_use]
    pub fn with_sound(mut self, player: Box<dyn SoundPlayer>, sound: SoundSource) -> Self {
        self.player = Some(player);
        self.sound = sound;
        self
    }
}

impl Alarm for SystemAlarm {
    fn ring(&self) {
        if let Some(notifier) = &self.notifier {
            if let Err(e) = notifier.send(&self.content) {
                warn!("Notification failed: {} ({})", e, e.suggestion());
            }
        } else {
            debug!("Notifications disabled");
        }

        if let Some(player) = &self.player {
            if let Err(e) = player.play(&self.sound) {
                warn!("Sound playback failed: {} ({})", e, e.suggestion());
            }
        } else {
            debug!("Sound disabled");
        }
    }
}

impl std::fmt::Debug for SystemAlarm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemAlarm")
            .field("notify", &self.notifier.is_some())
            .field("content", &self.content)
            .field("sound", &self.player.as_ref().map(|_| &self.sound))
            .finish()
    }
}

// ============================================================================
// MockAlarm
// ============================================================================

/// Mock alarm that counts rings.
#[derive(Debug, Default)]
pub struct MockAlarm {
    rings: AtomicUsize,
}

impl MockAlarm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.rings.load(Ordering::SeqCst)
    }
}

impl Alarm for MockAlarm {
    fn ring(&self) {
        self.rings.fetch_add(1, Ordering::SeqCst);
    }
}
