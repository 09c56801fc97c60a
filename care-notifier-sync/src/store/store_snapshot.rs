use crate::dto::{Notification, NotificationId};

///
/// Copy of the store contents, unaffected by later mutations of the store
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub(super) items: Vec<Notification>,
}

impl StoreSnapshot {
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_read).count()
    }

    pub fn contains(&self, id: &NotificationId) -> bool {
        self.items.iter().any(|item| item.id == *id)
    }
}
