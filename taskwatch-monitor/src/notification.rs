//! User-visible notifications

use std::time::Duration;

use tokio::sync::mpsc;

/// Default time a notification stays on screen
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// One-shot message for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub detail: Option<String>,
    /// How long the presentation should keep it visible
    pub duration: Duration,
}

impl Notification {
    pub fn success(title: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            detail: None,
            duration,
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>, duration: Duration) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            detail: Some(detail.into()),
            duration,
        }
    }
}

/// Creates the channel notifications are delivered on
pub fn channel() -> (
    mpsc::UnboundedSender<Notification>,
    mpsc::UnboundedReceiver<Notification>,
) {
    mpsc::unbounded_channel()
}
