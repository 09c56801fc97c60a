use super::push_listener::PushListener;
use crate::{
    dto::{HydrationState, MutationOutcome, NotificationId, NotificationsView},
    error::Error,
    mutator::{OptimisticMutator, SyncShared},
    push::PushChannel,
    remote::RemoteNotificationsService,
};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

///
/// Notifications of the signed in user kept in sync with the remote service.
///
/// Lifecycle:
/// 1. [NotificationCenter::mount] hydrates the store and connects the push channel
/// 2. user actions are applied optimistically
/// 3. [NotificationCenter::set_user] forgets notifications of the previous user
/// 4. [NotificationCenter::unmount] disconnects and empties the store,
///    results completing afterwards are discarded
///
/// Hydration failure is reported in [NotificationsView::hydration],
/// [NotificationCenter::hydrate] retries it.
///
pub struct NotificationCenter {
    shared: Arc<SyncShared>,
    remote: Arc<dyn RemoteNotificationsService>,
    push: Arc<dyn PushChannel>,
    mutator: OptimisticMutator,
    listener: Mutex<Option<PushListener>>,
    user_id: Mutex<Option<Uuid>>,
}

impl NotificationCenter {
    pub fn new(remote: Arc<dyn RemoteNotificationsService>, push: Arc<dyn PushChannel>) -> Self {
        let shared = Arc::new(SyncShared::new());
        let mutator = OptimisticMutator::new(shared.clone(), remote.clone());

        Self {
            shared,
            remote,
            push,
            mutator,
            listener: Mutex::new(None),
            user_id: Mutex::new(None),
        }
    }

    #[tracing::instrument(name = "Mount", skip(self))]
    pub async fn mount(&self, user_id: Option<Uuid>) {
        self.shared.attach();
        *self.user_id.lock().await = user_id;

        {
            let mut listener = self.listener.lock().await;
            if let Some(previous) = listener.take() {
                previous.close().await;
            }
            *listener = Some(PushListener::spawn(
                self.shared.clone(),
                self.push.on_notification(),
            ));
        }

        if let Err(err) = self.hydrate().await {
            tracing::warn!(%err, "mounted without notifications");
        }

        if let Some(user_id) = user_id {
            if let Err(err) = self.push.connect(user_id).await {
                tracing::error!(%err, "failed to connect push channel");
            }
        }
    }

    ///
    /// Replaces the store with notifications listed by the remote service.
    /// Notifications pushed while the list was fetched are kept.
    ///
    /// ### Errors
    /// - [Error::Remote] when list could not be fetched, store is left untouched
    /// - [Error::Unmounted] when center was unmounted
    ///
    #[tracing::instrument(name = "Hydrate", skip(self))]
    pub async fn hydrate(&self) -> Result<(), Error> {
        let (session, snapshot) = {
            let mut state = self.shared.lock_attached().await?;
            state.hydration = HydrationState::Loading;
            self.shared.publish(&state);

            (state.session, state.store.snapshot())
        };

        let result = self.remote.list().await;

        let mut state = self.shared.lock().await;
        if self.shared.is_detached() {
            tracing::debug!("discarded notifications list after unmount");
            return Ok(());
        }
        if state.session != session {
            tracing::debug!("discarded notifications list of previous user");
            return Ok(());
        }

        let result = match result {
            Ok(list) => {
                let arrived = state.store.arrived_since(&snapshot);
                state.store.hydrate(list.notifications, list.unread_count);
                for notification in arrived.into_iter().rev() {
                    state.store.prepend(notification);
                }

                tracing::info!(count = state.store.items().len(), "hydrated");
                state.hydration = HydrationState::Ready;
                Ok(())
            }
            Err(err) => {
                tracing::error!(%err, "failed to fetch notifications");
                state.hydration = HydrationState::Failed {
                    message: err.to_string(),
                };
                Err(Error::Remote(err))
            }
        };
        self.shared.publish(&state);

        result
    }

    ///
    /// Follows identity changes of the host application.
    ///
    /// - logout: push channel is disconnected and notifications are forgotten
    /// - same user: push channel is reconnected
    /// - another user: notifications are forgotten, push channel is connected
    ///     and notifications of the new user are listed
    ///
    /// ### Errors
    /// - [Error::Push] when push channel failed to connect
    /// - [Error::Remote] when notifications of the new user could not be listed
    /// - [Error::Unmounted] when center was unmounted
    ///
    #[tracing::instrument(name = "Set User", skip(self))]
    pub async fn set_user(&self, user_id: Option<Uuid>) -> Result<(), Error> {
        if self.shared.is_detached() {
            return Err(Error::Unmounted);
        }

        let previous = std::mem::replace(&mut *self.user_id.lock().await, user_id);

        match user_id {
            None => {
                self.push.disconnect().await;
                self.shared.reset().await;
                tracing::info!("signed out");
            }
            Some(user_id) if previous == Some(user_id) => {
                self.push.connect(user_id).await?;
            }
            Some(user_id) => {
                self.shared.reset().await;
                let connected = self.push.connect(user_id).await;
                self.hydrate().await?;
                connected?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(name = "Unmount", skip(self))]
    pub async fn unmount(&self) {
        self.shared.detach();

        let listener = self.listener.lock().await.take();
        if let Some(listener) = listener {
            listener.close().await;
        }

        self.push.disconnect().await;
        self.shared.reset().await;
    }

    pub fn view(&self) -> NotificationsView {
        self.shared.view()
    }

    ///
    /// Receiver updated after every change of the view
    ///
    pub fn subscribe(&self) -> watch::Receiver<NotificationsView> {
        self.shared.subscribe()
    }

    ///
    /// Mutator sharing the store of this center, cheap to clone
    ///
    pub fn mutator(&self) -> &OptimisticMutator {
        &self.mutator
    }

    pub async fn mark_read(&self, id: &NotificationId) -> Result<MutationOutcome, Error> {
        self.mutator.mark_read(id).await
    }

    pub async fn mark_all_read(&self) -> Result<MutationOutcome, Error> {
        self.mutator.mark_all_read().await
    }

    pub async fn delete_notification(
        &self,
        id: &NotificationId,
    ) -> Result<MutationOutcome, Error> {
        self.mutator.delete_notification(id).await
    }

    pub async fn clear_all<F>(&self, confirm: F) -> Result<MutationOutcome, Error>
    where
        F: FnOnce() -> bool + Send,
    {
        self.mutator.clear_all(confirm).await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        dto::{Notification, NotificationsList},
        push::MockPushChannel,
        remote::{MockRemoteNotificationsService, RemoteError},
    };
    use async_trait::async_trait;
    use mockall::predicate;
    use std::time::Duration;
    use time::macros::datetime;
    use tokio::sync::broadcast;

    #[tokio::test]
    async fn mount_hydrates_and_connects() {
        let user_id = Uuid::new_v4();
        let (_tx, push) = create_push(|push| {
            push.expect_connect()
                .with(predicate::eq(user_id))
                .once()
                .returning(|_| Ok(()));
            push.expect_disconnect().once().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        remote
            .expect_list()
            .once()
            .returning(|| Ok(list(vec![create_notification("b", 2, false), create_notification("a", 1, true)])));

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(Some(user_id)).await;

        let view = center.view();
        assert_eq!(view.hydration, HydrationState::Ready);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.unread_count, 1);
        assert!(view.settled);

        center.unmount().await;
    }

    #[tokio::test]
    async fn mount_without_user_does_not_connect() {
        let (_tx, push) = create_push(|push| {
            push.expect_connect().never();
            push.expect_disconnect().once().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        remote.expect_list().once().returning(|| Ok(list(Vec::new())));

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(None).await;

        assert_eq!(center.view().hydration, HydrationState::Ready);

        center.unmount().await;
    }

    #[tokio::test]
    async fn hydrate_failure_visible_and_retried() {
        let (_tx, push) = create_push(|push| {
            push.expect_disconnect().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        let mut calls = 0;
        remote.expect_list().times(2).returning(move || {
            calls += 1;
            match calls {
                1 => Err(RemoteError::Rejected {
                    status: 503,
                    message: "service unavailable".to_string(),
                }),
                _ => Ok(list(vec![create_notification("a", 1, false)])),
            }
        });

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(None).await;

        let view = center.view();
        assert!(matches!(view.hydration, HydrationState::Failed { .. }));
        assert!(view.items.is_empty());

        center.hydrate().await.unwrap();

        let view = center.view();
        assert_eq!(view.hydration, HydrationState::Ready);
        assert_eq!(view.unread_count, 1);

        center.unmount().await;
    }

    #[tokio::test]
    async fn hydrate_failure_keeps_previous_notifications() {
        let (_tx, push) = create_push(|push| {
            push.expect_disconnect().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        let mut calls = 0;
        remote.expect_list().times(2).returning(move || {
            calls += 1;
            match calls {
                1 => Ok(list(vec![create_notification("a", 1, false)])),
                _ => Err(RemoteError::Rejected {
                    status: 500,
                    message: "database error".to_string(),
                }),
            }
        });

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(None).await;

        let result = center.hydrate().await;

        assert!(matches!(result, Err(Error::Remote(_))));
        let view = center.view();
        assert_eq!(
            view.hydration,
            HydrationState::Failed {
                message: "rejected with status 500: database error".to_string()
            }
        );
        assert_eq!(view.items.len(), 1);

        center.unmount().await;
    }

    // Scenario: push delivers new unread notification, 1 unread stored
    #[tokio::test]
    async fn pushed_notification_on_top() {
        let (tx, push) = create_push(|push| {
            push.expect_disconnect().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        remote.expect_list().once().returning(|| {
            Ok(list(vec![
                create_notification("b", 2, true),
                create_notification("a", 1, false),
            ]))
        });

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(None).await;
        assert_eq!(center.view().unread_count, 1);

        let mut view_rx = center.subscribe();
        tx.send(create_notification("c", 3, false)).unwrap();
        tokio::time::timeout(Duration::from_secs(1), view_rx.changed())
            .await
            .unwrap()
            .unwrap();

        let view = center.view();
        assert_eq!(view.items[0].id, NotificationId::new("c"));
        assert_eq!(view.items.len(), 3);
        assert_eq!(view.unread_count, 2);

        center.unmount().await;
    }

    #[tokio::test]
    async fn pushed_during_hydrate_kept() {
        let (tx, push) = create_push(|push| {
            push.expect_disconnect().returning(|| ());
        });
        let remote = PushingRemote { push_tx: tx };

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(None).await;

        let view = center.view();
        assert_eq!(view.hydration, HydrationState::Ready);
        let ids: Vec<_> = view.items.iter().map(|item| item.id.clone()).collect();
        assert_eq!(ids, ["pushed", "b", "a"].map(NotificationId::new).to_vec());
        assert_eq!(view.unread_count, 2);

        center.unmount().await;
    }

    #[tokio::test]
    async fn pushed_duplicate_ignored() {
        let (tx, push) = create_push(|push| {
            push.expect_disconnect().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        remote
            .expect_list()
            .once()
            .returning(|| Ok(list(vec![create_notification("a", 1, false)])));

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(None).await;

        tx.send(create_notification("a", 1, false)).unwrap();
        tx.send(create_notification("b", 2, false)).unwrap();

        let mut view_rx = center.subscribe();
        tokio::time::timeout(
            Duration::from_secs(1),
            view_rx.wait_for(|view| view.items.len() == 2),
        )
        .await
        .unwrap()
        .unwrap();

        let view = center.view();
        assert_eq!(view.items[0].id, NotificationId::new("b"));
        assert_eq!(view.unread_count, 2);

        center.unmount().await;
    }

    #[tokio::test]
    async fn unmount_stops_updates() {
        let (tx, push) = create_push(|push| {
            push.expect_disconnect().once().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        remote
            .expect_list()
            .once()
            .returning(|| Ok(list(vec![create_notification("a", 1, false)])));
        remote.expect_mark_read().never();

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(None).await;
        center.unmount().await;

        // Listener is gone, nobody receives the notification
        assert!(tx.send(create_notification("b", 2, false)).is_err());

        let result = center.mark_read(&NotificationId::new("a")).await;
        assert!(matches!(result, Err(Error::Unmounted)));

        let result = center.hydrate().await;
        assert!(matches!(result, Err(Error::Unmounted)));

        let view = center.view();
        assert!(view.items.is_empty());
        assert_eq!(view.unread_count, 0);
    }

    #[tokio::test]
    async fn set_user_none_forgets_notifications() {
        let user_id = Uuid::new_v4();
        let (tx, push) = create_push(|push| {
            push.expect_connect()
                .with(predicate::eq(user_id))
                .once()
                .returning(|_| Ok(()));
            push.expect_disconnect().times(2).returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        remote
            .expect_list()
            .once()
            .returning(|| Ok(list(vec![create_notification("a", 1, false)])));

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(Some(user_id)).await;
        assert_eq!(center.view().unread_count, 1);

        center.set_user(None).await.unwrap();

        let view = center.view();
        assert!(view.items.is_empty());
        assert_eq!(view.unread_count, 0);
        assert_eq!(view.hydration, HydrationState::Idle);

        // listener stays mounted for the next user
        tx.send(create_notification("b", 2, false)).unwrap();
        let mut view_rx = center.subscribe();
        tokio::time::timeout(
            Duration::from_secs(1),
            view_rx.wait_for(|view| view.items.len() == 1),
        )
        .await
        .unwrap()
        .unwrap();

        center.unmount().await;
    }

    #[tokio::test]
    async fn set_user_other_user_replaces_notifications() {
        let first_user_id = Uuid::new_v4();
        let second_user_id = Uuid::new_v4();
        let (_tx, push) = create_push(|push| {
            push.expect_connect()
                .with(predicate::eq(first_user_id))
                .once()
                .returning(|_| Ok(()));
            push.expect_connect()
                .with(predicate::eq(second_user_id))
                .once()
                .returning(|_| Ok(()));
            push.expect_disconnect().once().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        let mut calls = 0;
        remote.expect_list().times(2).returning(move || {
            calls += 1;
            match calls {
                1 => Ok(list(vec![
                    create_notification("first-b", 2, false),
                    create_notification("first-a", 1, false),
                ])),
                _ => Ok(list(vec![create_notification("second-a", 3, true)])),
            }
        });

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(Some(first_user_id)).await;
        assert_eq!(center.view().unread_count, 2);

        center.set_user(Some(second_user_id)).await.unwrap();

        let view = center.view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id, NotificationId::new("second-a"));
        assert_eq!(view.unread_count, 0);
        assert_eq!(view.hydration, HydrationState::Ready);

        center.unmount().await;
    }

    #[tokio::test]
    async fn set_user_same_user_reconnects_only() {
        let user_id = Uuid::new_v4();
        let (_tx, push) = create_push(|push| {
            push.expect_connect()
                .with(predicate::eq(user_id))
                .times(2)
                .returning(|_| Ok(()));
            push.expect_disconnect().once().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        remote
            .expect_list()
            .once()
            .returning(|| Ok(list(vec![create_notification("a", 1, false)])));

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(Some(user_id)).await;

        center.set_user(Some(user_id)).await.unwrap();

        assert_eq!(center.view().items.len(), 1);

        center.unmount().await;
    }

    #[tokio::test]
    async fn mark_read_publishes_view() {
        let (_tx, push) = create_push(|push| {
            push.expect_disconnect().returning(|| ());
        });
        let mut remote = MockRemoteNotificationsService::new();
        remote
            .expect_list()
            .once()
            .returning(|| Ok(list(vec![create_notification("a", 1, false)])));
        remote
            .expect_mark_read()
            .with(predicate::eq(NotificationId::new("a")))
            .once()
            .returning(|_| Ok(()));

        let center = NotificationCenter::new(Arc::new(remote), push);
        center.mount(None).await;
        let view_rx = center.subscribe();

        let outcome = center.mark_read(&NotificationId::new("a")).await.unwrap();

        assert_eq!(outcome, MutationOutcome::Confirmed);
        let view = view_rx.borrow().clone();
        assert_eq!(view.unread_count, 0);
        assert!(view.settled);

        center.unmount().await;
    }

    ///
    /// Remote service whose list is fetched while a notification is pushed
    ///
    struct PushingRemote {
        push_tx: broadcast::Sender<Notification>,
    }

    #[async_trait]
    impl RemoteNotificationsService for PushingRemote {
        async fn list(&self) -> Result<NotificationsList, RemoteError> {
            self.push_tx
                .send(create_notification("pushed", 3, false))
                .unwrap();
            // listener applies the push before the list arrives
            tokio::time::sleep(Duration::from_millis(100)).await;

            Ok(list(vec![
                create_notification("b", 2, true),
                create_notification("a", 1, false),
            ]))
        }

        async fn mark_read(&self, _id: &NotificationId) -> Result<(), RemoteError> {
            unimplemented!()
        }

        async fn mark_all_read(&self) -> Result<(), RemoteError> {
            unimplemented!()
        }

        async fn delete(&self, _id: &NotificationId) -> Result<(), RemoteError> {
            unimplemented!()
        }

        async fn clear_all(&self) -> Result<(), RemoteError> {
            unimplemented!()
        }
    }

    fn create_push(
        expectations: impl FnOnce(&mut MockPushChannel),
    ) -> (broadcast::Sender<Notification>, Arc<dyn PushChannel>) {
        let (tx, _) = broadcast::channel(8);

        let mut push = MockPushChannel::new();
        let push_tx = tx.clone();
        push.expect_on_notification()
            .returning(move || push_tx.subscribe());
        expectations(&mut push);

        (tx, Arc::new(push))
    }

    fn list(notifications: Vec<Notification>) -> NotificationsList {
        let unread_count = notifications.iter().filter(|item| !item.is_read).count();

        NotificationsList {
            notifications,
            unread_count,
        }
    }

    fn create_notification(id: &str, minute: u8, is_read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id),
            title: format!("title {id}"),
            message: format!("message {id}"),
            kind: "success".to_string(),
            is_read,
            created_at: datetime!(2024-08-05 09:00:00 UTC)
                + time::Duration::minutes(minute.into()),
        }
    }
}
