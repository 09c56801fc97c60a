use bson::{DateTime, Uuid};
use serde::Serialize;

#[derive(Serialize)]
pub struct NotificationInsertEntity<'a> {
    pub user_id: Uuid,
    pub created_at: DateTime,
    pub title: &'a str,
    pub message: &'a str,
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub is_read: bool,
}
