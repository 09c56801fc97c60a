use super::StoreSnapshot;
use crate::dto::{Notification, NotificationId};
use std::collections::HashSet;

///
/// Local list of notifications, newest first.
///
/// Unread count is derived from the items so it cannot drift from them.
/// Ids are unique.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationStore {
    items: Vec<Notification>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_read).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn contains(&self, id: &NotificationId) -> bool {
        self.get(id).is_some()
    }

    ///
    /// Replaces content with notifications listed by the remote service.
    /// `unread_count` reported by the server is only checked against the items.
    ///
    pub fn hydrate(&mut self, items: Vec<Notification>, unread_count: usize) {
        let mut seen = HashSet::with_capacity(items.len());
        let mut items = items;
        items.retain(|item| seen.insert(item.id.clone()));

        self.items = items;

        let derived_unread_count = self.unread_count();
        if derived_unread_count != unread_count {
            tracing::warn!(
                unread_count,
                derived_unread_count,
                "server unread count does not match notifications"
            );
        }
    }

    ///
    /// Inserts notification at the head.
    ///
    /// ### Returns
    /// false when notification with the same id is already stored
    ///
    pub fn prepend(&mut self, notification: Notification) -> bool {
        if self.contains(&notification.id) {
            tracing::debug!(id = %notification.id, "notification already stored");
            return false;
        }

        self.items.insert(0, notification);

        true
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            items: self.items.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: StoreSnapshot) {
        self.items = snapshot.items;
    }

    ///
    /// Notifications stored now that were not stored when snapshot was taken,
    /// in their current order
    ///
    pub fn arrived_since(&self, snapshot: &StoreSnapshot) -> Vec<Notification> {
        self.items
            .iter()
            .filter(|item| !snapshot.contains(&item.id))
            .cloned()
            .collect()
    }

    ///
    /// ### Returns
    /// - `None` when notification does not exist
    /// - `Some(was_unread)` otherwise
    ///
    pub fn mark_read(&mut self, id: &NotificationId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == *id)?;
        let was_unread = !item.is_read;
        item.is_read = true;

        Some(was_unread)
    }

    ///
    /// ### Returns
    /// false when notification does not exist
    ///
    pub fn mark_unread(&mut self, id: &NotificationId) -> bool {
        match self.items.iter_mut().find(|item| item.id == *id) {
            Some(item) => {
                item.is_read = false;
                true
            }
            None => false,
        }
    }

    ///
    /// ### Returns
    /// number of notifications that were unread
    ///
    pub fn mark_all_read(&mut self) -> usize {
        let mut count = 0;
        for item in self.items.iter_mut().filter(|item| !item.is_read) {
            item.is_read = true;
            count += 1;
        }

        count
    }

    pub fn remove(&mut self, id: &NotificationId) -> Option<Notification> {
        let idx = self.items.iter().position(|item| item.id == *id)?;

        Some(self.items.remove(idx))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    ///
    /// Inserts notification so that items stay sorted by creation date, newest first.
    /// Notifications created at the same time keep their relative order.
    ///
    /// ### Returns
    /// false when notification with the same id is already stored
    ///
    pub fn reinsert(&mut self, notification: Notification) -> bool {
        if self.contains(&notification.id) {
            tracing::debug!(id = %notification.id, "notification already stored");
            return false;
        }

        let idx = self
            .items
            .partition_point(|item| item.created_at >= notification.created_at);
        self.items.insert(idx, notification);

        true
    }
}
