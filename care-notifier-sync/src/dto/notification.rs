use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum::{AsRefStr, EnumString};
use time::{macros::format_description, OffsetDateTime};

///
/// Opaque id assigned by the remote service
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,

    /// Raw type sent by the server, see [Notification::notification_type]
    #[serde(rename = "type")]
    pub kind: String,

    pub is_read: bool,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    ///
    /// Type used for display.
    /// Unknown types are shown as [NotificationType::Info].
    ///
    pub fn notification_type(&self) -> NotificationType {
        self.kind.parse().unwrap_or(NotificationType::Info)
    }

    ///
    /// Relative age of the notification, e.g. `5m ago`.
    /// Notifications older than a week show the calendar date.
    ///
    pub fn time_ago(&self, now: OffsetDateTime) -> String {
        let elapsed = now - self.created_at;

        let minutes = elapsed.whole_minutes();
        if minutes < 1 {
            return "just now".to_string();
        }
        if minutes < 60 {
            return format!("{minutes}m ago");
        }

        let hours = elapsed.whole_hours();
        if hours < 24 {
            return format!("{hours}h ago");
        }

        let days = elapsed.whole_days();
        if days < 7 {
            return format!("{days}d ago");
        }

        self.created_at
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| format!("{days}d ago"))
    }
}
