use crate::{dto::NotificationId, push::PushError, remote::RemoteError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("notification {0} not exist")]
    NotificationNotExist(NotificationId),

    #[error("mutation of notification {0} already in flight")]
    ItemMutationInFlight(NotificationId),

    #[error("bulk mutation already in flight")]
    BulkMutationInFlight,

    #[error("{0} mutations already in flight")]
    MutationsInFlight(usize),

    #[error("notification center unmounted")]
    Unmounted,

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("push channel error: {0}")]
    Push(#[from] PushError),
}
