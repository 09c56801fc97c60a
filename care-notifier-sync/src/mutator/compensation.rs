use crate::{
    dto::{Notification, NotificationId},
    store::{NotificationStore, StoreSnapshot},
};

///
/// Reverts optimistic change after the remote service rejected it
///
#[derive(Debug)]
pub enum Compensation {
    Nothing,
    MarkUnread(NotificationId),
    Reinsert(Notification),

    /// Notifications pushed after the snapshot was taken are kept
    Restore(StoreSnapshot),
}

impl Compensation {
    pub fn apply(self, store: &mut NotificationStore) {
        match self {
            Compensation::Nothing => (),
            Compensation::MarkUnread(id) => {
                if !store.mark_unread(&id) {
                    tracing::debug!(%id, "notification to mark unread is gone");
                }
            }
            Compensation::Reinsert(notification) => {
                store.reinsert(notification);
            }
            Compensation::Restore(snapshot) => {
                let arrived = store.arrived_since(&snapshot);
                store.restore(snapshot);

                for notification in arrived.into_iter().rev() {
                    store.prepend(notification);
                }
            }
        }
    }
}
