use super::dto::PushMessage;
use crate::dto::Notification;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::{
    net::TcpStream,
    sync::{broadcast, Notify},
    task::JoinHandle,
};
use tokio_tungstenite::{tungstenite::Message, MaybeTlsStream, WebSocketStream};
use uuid::Uuid;

pub type PushWebSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

///
/// Task forwarding notifications from the websocket to the broadcast channel
///
pub struct WebSocketReader {
    task_handle: JoinHandle<()>,

    close_notify: Arc<Notify>,
}

impl WebSocketReader {
    pub fn spawn(
        user_id: Uuid,
        websocket: PushWebSocket,
        notifications_tx: broadcast::Sender<Notification>,
    ) -> Self {
        let close_notify = Arc::new(Notify::new());
        let close_notify_clone = Arc::clone(&close_notify);
        let task_handle = tokio::spawn(async move {
            run(user_id, websocket, notifications_tx, close_notify_clone).await;
        });

        Self {
            task_handle,
            close_notify,
        }
    }

    pub async fn close(self) {
        tracing::info!("closing push websocket");

        self.close_notify.notify_one();

        if let Err(err) = self.task_handle.await {
            tracing::error!(%err, "push websocket task failed");
        }

        tracing::info!("push websocket closed");
    }
}

#[tracing::instrument(name = "Push WebSocket", skip_all, fields(%user_id))]
async fn run(
    user_id: Uuid,
    mut websocket: PushWebSocket,
    notifications_tx: broadcast::Sender<Notification>,
    close_notify: Arc<Notify>,
) {
    loop {
        tokio::select! {
            biased;

            // Wait for signal to close
            _ = close_notify.notified() => {
                if let Err(err) = websocket.close(None).await {
                    tracing::debug!(%err, "failed to close websocket");
                }
                break;
            }

            // Wait for message from the server
            message = websocket.next() => match message {
                Some(Ok(Message::Text(text))) => forward(&text, &notifications_tx),
                Some(Ok(Message::Binary(_))) => tracing::warn!("ignored binary message"),
                Some(Ok(Message::Close(_))) => {
                    tracing::info!("server closed connection");
                    break;
                }
                Some(Ok(_)) => tracing::trace!("processed control message"),
                Some(Err(err)) => {
                    tracing::warn!(%err, "failed to read message");
                    break;
                }
                None => {
                    tracing::info!("websocket stream closed");
                    break;
                }
            }
        }
    }
}

fn forward(text: &str, notifications_tx: &broadcast::Sender<Notification>) {
    let notification = match serde_json::from_str::<PushMessage>(text) {
        Ok(PushMessage::Notification { notification }) => notification,
        Err(err) => {
            tracing::warn!(%err, "ignored invalid push message");
            return;
        }
    };

    tracing::info!(id = %notification.id, "received notification");
    if notifications_tx.send(notification).is_err() {
        tracing::debug!("no receivers for pushed notification");
    }
}
