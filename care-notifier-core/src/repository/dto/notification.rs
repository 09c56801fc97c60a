use super::super::entity::NotificationFindEntity;
use bson::oid::ObjectId;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: ObjectId,
    pub created_at: OffsetDateTime,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
}

impl From<NotificationFindEntity> for Notification {
    fn from(value: NotificationFindEntity) -> Self {
        Self {
            id: value._id,
            created_at: value.created_at.into(),
            title: value.title,
            message: value.message,
            kind: value.kind,
            is_read: value.is_read,
        }
    }
}
