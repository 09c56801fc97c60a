use super::Notification;

///
/// Notifications of the user as listed by the remote service
///
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationsList {
    /// Newest first
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}
