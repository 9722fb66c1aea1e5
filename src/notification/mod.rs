//! Desktop notifications.
//!
//! This module raises the "timer complete" alert through the desktop's
//! notification server. It includes:
//!
//! - A content builder with input sanitizing
//! - A notify-rust backed sender
//! - A mock sender for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use timerpal::notification::{
//!     create_timer_complete_content, DesktopNotifier, NotificationSender, DEFAULT_ICON,
//! };
//!
//! let content = create_timer_complete_content(DEFAULT_ICON);
//! if let Err(e) = DesktopNotifier::new().send(&content) {
//!     eprintln!("{} ({})", e, e.suggestion());
//! }
//! ```

mod content;
pub mod error;
mod sender;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use self::content::{
    create_timer_complete_content, sanitize_text, NotificationContent,
    NotificationContentBuilder, Urgency, APP_NAME, DEFAULT_ICON,
};
pub use self::error::NotificationError;
pub use self::sender::DesktopNotifier;

/// Trait for notification delivery.
pub trait NotificationSender {
    /// Shows a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    fn send(&self, content: &NotificationContent) -> Result<(), NotificationError>;
}

impl<N: NotificationSender + ?Sized> NotificationSender for Arc<N> {
    fn send(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        (**self).send(content)
    }
}

/// Mock notification sender for testing.
#[derive(Debug, Default)]
pub struct MockNotificationSender {
    sent: Mutex<Vec<NotificationContent>>,
    should_fail: AtomicBool,
}

impl MockNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_sent(&self) -> Vec<NotificationContent> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationSender for MockNotificationSender {
    fn send(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.sent.lock().unwrap().push(content.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_sent() {
        let sender = MockNotificationSender::new();
        let content = create_timer_complete_content(DEFAULT_ICON);

        sender.send(&content).unwrap();

        assert_eq!(sender.sent_count(), 1);
        assert_eq!(sender.get_sent()[0], content);
    }

    #[test]
    fn test_mock_failure() {
        let sender = MockNotificationSender::new();
        sender.set_should_fail(true);

        let result = sender.send(&create_timer_complete_content(""));
        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
        assert_eq!(sender.sent_count(), 0);
    }

    #[test]
    fn test_arc_forwards() {
        let sender = Arc::new(MockNotificationSender::new());
        let shared: Arc<MockNotificationSender> = Arc::clone(&sender);

        NotificationSender::send(&shared, &create_timer_complete_content("")).unwrap();
        assert_eq!(sender.sent_count(), 1);
    }
}
