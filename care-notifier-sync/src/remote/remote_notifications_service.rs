use super::RemoteError;
use crate::dto::{NotificationId, NotificationsList};
use async_trait::async_trait;

///
/// Source of truth for notifications of the signed in user.
///
/// Transport failures and rejections reported by the service
/// are both returned as [RemoteError].
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteNotificationsService: Send + Sync {
    async fn list(&self) -> Result<NotificationsList, RemoteError>;

    async fn mark_read(&self, id: &NotificationId) -> Result<(), RemoteError>;

    async fn mark_all_read(&self) -> Result<(), RemoteError>;

    async fn delete(&self, id: &NotificationId) -> Result<(), RemoteError>;

    async fn clear_all(&self) -> Result<(), RemoteError>;
}
