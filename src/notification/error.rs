//! Notification system error types.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The desktop notification service rejected or never received the
    /// notification.
    #[error("通知の送信に失敗しました: {0}")]
    SendFailed(String),

    /// Invalid input provided to the notification system.
    #[error("無効な入力: {0}")]
    InvalidInput(String),
}

impl NotificationError {
    /// Returns true if the notification service itself failed.
    #[must_use]
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::SendFailed(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => "通知デーモンが起動しているか確認してください",
            Self::InvalidInput(_) => "入力値を確認してください",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NotificationError::SendFailed("dbus unavailable".to_string());
        assert!(err.to_string().contains("dbus unavailable"));
        assert!(err.to_string().contains("通知の送信に失敗しました"));

        let err = NotificationError::InvalidInput("empty summary".to_string());
        assert!(err.to_string().contains("empty summary"));
    }

    #[test]
    fn test_is_service_error() {
        assert!(NotificationError::SendFailed("x".into()).is_service_error());
        assert!(!NotificationError::InvalidInput("x".into()).is_service_error());
    }

    #[test]
    fn test_suggestion() {
        let err = NotificationError::SendFailed("x".into());
        assert!(err.suggestion().contains("通知デーモン"));
    }
}
