//! Desktop notification delivery via notify-rust.

use notify_rust::Notification;
use tracing::debug;

use super::content::{NotificationContent, APP_NAME};
use super::error::NotificationError;
use super::NotificationSender;

/// Sends notifications to the desktop notification server.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSender for DesktopNotifier {
    fn send(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(&content.summary)
            .body(&content.body);

        if let Some(icon) = &content.icon {
            notification.icon(icon);
        }

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.urgency(to_urgency(content.urgency));

        notification
            .show()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        debug!("Notification sent: {}", content.summary);
        Ok(())
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn to_urgency(urgency: super::Urgency) -> notify_rust::Urgency {
    match urgency {
        super::Urgency::Low => notify_rust::Urgency::Low,
        super::Urgency::Normal => notify_rust::Urgency::Normal,
        super::Urgency::Critical => notify_rust::Urgency::Critical,
    }
}
