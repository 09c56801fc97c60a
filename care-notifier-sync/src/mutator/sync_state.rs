use super::in_flight::InFlight;
use crate::{
    dto::{HydrationState, Notification, NotificationsView},
    error::Error,
    store::NotificationStore,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{watch, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct SyncState {
    pub store: NotificationStore,
    pub hydration: HydrationState,
    pub in_flight: InFlight,

    /// Changed whenever notifications of another user replace the store
    pub session: u64,
}

impl SyncState {
    pub fn view(&self) -> NotificationsView {
        NotificationsView {
            items: self.store.items().to_vec(),
            unread_count: self.store.unread_count(),
            hydration: self.hydration.clone(),
            settled: self.in_flight.is_empty(),
        }
    }

    ///
    /// Forgets notifications of the previous user.
    /// Results of calls started before the reset are discarded.
    ///
    pub fn reset(&mut self) {
        self.store.clear();
        self.hydration = HydrationState::Idle;
        self.session = self.session.wrapping_add(1);
    }
}

///
/// State shared by the mutator, the push listener and the notification center.
///
/// Lock is never held across remote calls.
///
pub struct SyncShared {
    state: Mutex<SyncState>,
    detached: AtomicBool,
    view_tx: watch::Sender<NotificationsView>,
}

impl SyncShared {
    pub fn new() -> Self {
        let state = SyncState::default();
        let (view_tx, _) = watch::channel(state.view());

        Self {
            state: Mutex::new(state),
            detached: AtomicBool::new(false),
            view_tx,
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().await
    }

    ///
    /// Locks state of the mounted center
    ///
    /// ### Errors
    /// - [Error::Unmounted] when center was unmounted
    ///
    pub async fn lock_attached(&self) -> Result<MutexGuard<'_, SyncState>, Error> {
        let state = self.state.lock().await;
        if self.is_detached() {
            return Err(Error::Unmounted);
        }

        Ok(state)
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }

    pub fn detach(&self) {
        self.detached.store(true, Ordering::Release);
    }

    pub fn attach(&self) {
        self.detached.store(false, Ordering::Release);
    }

    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.reset();
        tracing::debug!(session = state.session, "notifications forgotten");
        self.publish(&state);
    }

    pub fn publish(&self, state: &SyncState) {
        self.view_tx.send_replace(state.view());
    }

    pub fn view(&self) -> NotificationsView {
        self.view_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationsView> {
        self.view_tx.subscribe()
    }

    ///
    /// Prepends notification delivered by the push channel.
    /// Notifications arriving after unmount are dropped.
    ///
    pub async fn apply_push(&self, notification: Notification) {
        let mut state = self.state.lock().await;
        if self.is_detached() {
            tracing::debug!(id = %notification.id, "discarded notification pushed after unmount");
            return;
        }

        if state.store.prepend(notification) {
            self.publish(&state);
        }
    }
}
