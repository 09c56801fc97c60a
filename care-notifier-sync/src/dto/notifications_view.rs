use super::Notification;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HydrationState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed {
        message: String,
    },
}

///
/// Everything needed to render the notification badge and panel
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsView {
    pub items: Vec<Notification>,
    pub unread_count: usize,
    pub hydration: HydrationState,

    /// No mutation awaits remote confirmation
    pub settled: bool,
}
