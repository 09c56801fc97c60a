use super::{dto::Notification, error::Error};
use axum::async_trait;
use bson::oid::ObjectId;
use time::OffsetDateTime;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    ///
    /// Inserts new unread notification for the user.
    ///
    /// ### Returns
    /// ID of inserted notification
    ///
    async fn insert(
        &self,
        user_id: Uuid,
        created_at: OffsetDateTime,
        title: &str,
        message: &str,
        kind: &str,
    ) -> Result<ObjectId, Error>;

    ///
    /// Finds all notifications that belong to the user.
    /// Notifications are sorted descending by creation date.
    ///
    async fn find_many(&self, user_id: Uuid) -> Result<Vec<Notification>, Error>;

    ///
    /// Marks notification as read.
    /// Marking notification that is already read is not an error.
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when
    ///     - notification does not exist
    ///     - notification does not belong to the user
    ///
    async fn update_read(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Marks all notifications of the user as read.
    ///
    /// ### Returns
    /// Number of notifications that were unread
    ///
    async fn update_many_read(&self, user_id: Uuid) -> Result<u64, Error>;

    ///
    /// Deletes notification
    ///
    /// ### Errors
    /// - [Error::NoDocumentUpdated] when
    ///     - notification does not exist
    ///     - notification does not belong to the user
    ///
    async fn delete(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Deletes all notifications of the user.
    ///
    /// ### Returns
    /// Number of deleted notifications
    ///
    async fn delete_many(&self, user_id: Uuid) -> Result<u64, Error>;
}
