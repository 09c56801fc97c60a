use super::PushError;
use crate::dto::Notification;
use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

///
/// Persistent connection delivering notifications created for the user.
/// Reconnecting after the connection drops is up to the implementation.
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushChannel: Send + Sync {
    ///
    /// Opens connection for the user.
    /// Connection of the previous user is closed first.
    ///
    async fn connect(&self, user_id: Uuid) -> Result<(), PushError>;

    ///
    /// Every pushed notification is sent to every receiver
    /// subscribed at the time it arrived.
    ///
    fn on_notification(&self) -> broadcast::Receiver<Notification>;

    async fn disconnect(&self);
}
