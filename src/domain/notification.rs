use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
    DemoRequest,
    UserActivity,
    System,
}

impl NotificationType {
    pub const ALL: [NotificationType; 7] = [
        NotificationType::Info,
        NotificationType::Success,
        NotificationType::Warning,
        NotificationType::Error,
        NotificationType::DemoRequest,
        NotificationType::UserActivity,
        NotificationType::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Info => "info",
            NotificationType::Success => "success",
            NotificationType::Warning => "warning",
            NotificationType::Error => "error",
            NotificationType::DemoRequest => "demo_request",
            NotificationType::UserActivity => "user_activity",
            NotificationType::System => "system",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A notification as submitted by a caller, before the store assigns
/// its id and timestamp. `read` has no default so callers can insert
/// already-read records.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub action_url: Option<String>,
    pub action_label: Option<String>,
    pub icon: Option<String>,
}

impl NewNotification {
    pub fn new(
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            notification_type,
            title: title.into(),
            message: message.into(),
            read,
            action_url: None,
            action_label: None,
            icon: None,
        }
    }

    pub fn with_action(mut self, url: impl Into<String>, label: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self.action_label = Some(label.into());
        self
    }

    pub fn into_notification(self, id: String, timestamp: DateTime<Utc>) -> Notification {
        Notification {
            id,
            notification_type: self.notification_type,
            title: self.title,
            message: self.message,
            timestamp,
            read: self.read,
            action_url: self.action_url,
            action_label: self.action_label,
            icon: self.icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total: usize,
    pub unread: usize,
    pub by_type: BTreeMap<NotificationType, usize>,
}

impl NotificationStats {
    /// Single pass over the feed; every type is present in `by_type`,
    /// zero-filled when absent.
    pub fn from_notifications(notifications: &[Notification]) -> Self {
        let mut by_type: BTreeMap<NotificationType, usize> =
            NotificationType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut unread = 0;

        for notification in notifications {
            if !notification.read {
                unread += 1;
            }
            *by_type.entry(notification.notification_type).or_insert(0) += 1;
        }

        Self {
            total: notifications.len(),
            unread,
            by_type,
        }
    }
}
