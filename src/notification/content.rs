//! Notification content construction.
//!
//! This module provides a builder for creating notification content
//! with a fluent API.

use super::error::NotificationError;

/// Maximum length for summary and body text in notifications.
const MAX_TEXT_LENGTH: usize = 200;

/// Application name shown by the notification server.
pub const APP_NAME: &str = "timerpal";

/// Icon shown next to the completion notification.
pub const DEFAULT_ICON: &str = "/usr/share/icons/Humanity/apps/16/clock.svg";

/// How intrusive the notification should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    /// Stays on screen until dismissed on most desktops.
    Critical,
}

/// Everything needed to display one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub summary: String,
    pub body: String,
    pub icon: Option<String>,
    pub urgency: Urgency,
}

/// Builder for constructing notification content.
#[derive(Debug, Clone, Default)]
pub struct NotificationContentBuilder {
    summary: Option<String>,
    body: String,
    icon: Option<String>,
    urgency: Urgency,
}

impl NotificationContentBuilder {
    /// Creates a new notification content builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the notification summary (title line).
    #[must_use]
    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = sanitize_text(summary);
        self
    }

    /// Sets the notification body text.
    #[must_use]
    pub fn body(mut self, body: &str) -> Self {
        self.body = sanitize_text(body).unwrap_or_default();
        self
    }

    /// Sets the icon name or path.
    #[must_use]
    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string()).filter(|i| !i.is_empty());
        self
    }

    /// Sets the urgency level.
    #[must_use]
    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Builds and returns the notification content.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidInput` if no usable summary was
    /// set.
    pub fn build(self) -> Result<NotificationContent, NotificationError> {
        let summary = self
            .summary
            .ok_or_else(|| NotificationError::InvalidInput("summary is empty".to_string()))?;

        Ok(NotificationContent {
            summary,
            body: self.body,
            icon: self.icon,
            urgency: self.urgency,
        })
    }
}

/// Sanitizes text for use in notifications.
///
/// Returns the sanitized text or None if nothing printable remains.
pub fn sanitize_text(text: &str) -> Option<String> {
    let sanitized: String = text
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_TEXT_LENGTH)
        .collect();

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized)
    }
}

/// Creates notification content for countdown completion.
///
/// # Arguments
/// * `icon` - Icon name or path; empty for none
#[must_use]
pub fn create_timer_complete_content(icon: &str) -> NotificationContent {
    NotificationContent {
        summary: APP_NAME.to_string(),
        body: "タイマーが完了しました！".to_string(),
        icon: Some(icon.to_string()).filter(|i| !i.is_empty()),
        urgency: Urgency::Critical,
    }
}
