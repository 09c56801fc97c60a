use crate::dto::{Notification, NotificationsList};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBody {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

impl From<ListBody> for NotificationsList {
    fn from(value: ListBody) -> Self {
        Self {
            notifications: value.notifications,
            unread_count: value.unread_count,
        }
    }
}
