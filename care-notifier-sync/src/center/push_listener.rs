use crate::{dto::Notification, mutator::SyncShared};
use std::sync::Arc;
use tokio::{
    sync::{broadcast, Notify},
    task::JoinHandle,
};

///
/// Task prepending pushed notifications to the store
///
pub struct PushListener {
    task_handle: JoinHandle<()>,

    close_notify: Arc<Notify>,
}

impl PushListener {
    pub fn spawn(
        shared: Arc<SyncShared>,
        notifications_rx: broadcast::Receiver<Notification>,
    ) -> Self {
        let close_notify = Arc::new(Notify::new());
        let close_notify_clone = Arc::clone(&close_notify);
        let task_handle = tokio::spawn(async move {
            run(shared, notifications_rx, close_notify_clone).await;
        });

        Self {
            task_handle,
            close_notify,
        }
    }

    pub async fn close(self) {
        tracing::info!("closing push listener");

        self.close_notify.notify_one();

        if let Err(err) = self.task_handle.await {
            tracing::error!(%err, "push listener task failed");
        }

        tracing::info!("push listener closed");
    }
}

#[tracing::instrument(name = "Push Listener", skip_all)]
async fn run(
    shared: Arc<SyncShared>,
    mut notifications_rx: broadcast::Receiver<Notification>,
    close_notify: Arc<Notify>,
) {
    loop {
        tokio::select! {
            biased;

            // Wait for signal to close
            _ = close_notify.notified() => break,

            // Wait for pushed notification
            result = notifications_rx.recv() => match result {
                Ok(notification) => {
                    tracing::debug!(id = %notification.id, "received notification");
                    shared.apply_push(notification).await;
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "push listener lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("push channel closed");
                    break;
                }
            }
        }
    }
}
