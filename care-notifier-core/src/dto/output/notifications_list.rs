use super::Notification;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsList {
    pub success: bool,
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}
