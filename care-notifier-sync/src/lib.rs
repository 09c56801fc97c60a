//!
//! Client side synchronization of care-notifier notifications.
//!
//! [NotificationCenter] keeps a local [NotificationStore] hydrated from the
//! [RemoteNotificationsService], prepends notifications delivered by the
//! [PushChannel] and applies user actions optimistically, compensating them
//! when the remote service rejects the change.
//!

mod center;
pub mod dto;
mod error;
mod mutator;
pub mod push;
pub mod remote;
mod store;

pub use center::NotificationCenter;
pub use error::Error;
pub use mutator::OptimisticMutator;
pub use push::{PushChannel, PushError, WebSocketPushChannel, WebSocketPushChannelConfig};
pub use remote::{
    RemoteError, RemoteNotificationsService, RestNotificationsService,
    RestNotificationsServiceConfig,
};
pub use store::{NotificationStore, StoreSnapshot};
