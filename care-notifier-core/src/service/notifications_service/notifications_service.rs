use crate::{
    dto::{input, output},
    error::Error,
};
use axum::async_trait;
use bson::oid::ObjectId;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    ///
    /// Save new notification and push it to connected sessions of the recipient.
    ///
    /// ### Returns
    /// ID of created notification
    ///
    /// ### Errors
    /// - [Error::Validation] when
    ///     - title is blank
    /// - [Error::ValidationTooLong] when
    ///     - title or message is too long
    ///
    async fn save_notification(
        &self,
        notification: input::Notification,
    ) -> Result<output::NotificationId, Error>;

    ///
    /// Find all notifications that belong to the user, newest first.
    ///
    /// ### Returns
    /// notifications with number of unread ones
    ///
    async fn find_notifications(&self, user_id: Uuid) -> Result<output::NotificationsList, Error>;

    ///
    /// Mark notification as read
    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when
    ///     - notification with id does not exist
    ///     - notification does not belong to the user
    ///
    async fn mark_read(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Mark all notifications of the user as read
    ///
    async fn mark_all_read(&self, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Delete notification
    ///
    /// ### Errors
    /// - [Error::NotificationNotExist] when
    ///     - notification with id does not exist
    ///     - notification does not belong to the user
    ///
    async fn delete_notification(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error>;

    ///
    /// Delete all notifications of the user
    ///
    async fn clear_all(&self, user_id: Uuid) -> Result<(), Error>;
}
