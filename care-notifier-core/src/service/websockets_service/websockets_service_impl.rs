use super::{
    dto::{PushFrame, WebSocketsServiceConfig},
    websocket_connection::WebSocketConnection,
    WebSocketsService,
};
use crate::dto::output;
use axum::{async_trait, extract::ws::WebSocket};
use futures::StreamExt;
use std::{collections::HashMap, net::SocketAddr, sync::Arc};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

pub struct WebSocketsServiceImpl {
    config: Arc<WebSocketsServiceConfig>,
    users_connections: RwLock<HashMap<Uuid, broadcast::Sender<Arc<PushFrame>>>>,
}

impl WebSocketsServiceImpl {
    pub fn new(config: WebSocketsServiceConfig) -> Self {
        let config = Arc::new(config);
        let users_connections = RwLock::new(HashMap::new());

        Self {
            config,
            users_connections,
        }
    }

    async fn subscribe(&self, user_id: Uuid) -> broadcast::Receiver<Arc<PushFrame>> {
        let mut connections = self.users_connections.write().await;
        connections
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.config.connection_buffer_size).0)
            .subscribe()
    }

    async fn unsubscribe(&self, user_id: Uuid) {
        let mut connections = self.users_connections.write().await;
        let is_unused = connections
            .get(&user_id)
            .is_some_and(|tx| tx.receiver_count() == 0);

        if is_unused {
            connections.remove(&user_id);
            tracing::debug!(%user_id, "removed user channel");
        }
    }

    fn create_frame(notification: output::Notification) -> anyhow::Result<Arc<PushFrame>> {
        let notification_id = notification.id.clone();
        let text = serde_json::to_string(&output::PushMessage::Notification { notification })?;

        Ok(Arc::new(PushFrame {
            notification_id,
            text,
        }))
    }
}

#[async_trait]
impl WebSocketsService for WebSocketsServiceImpl {
    async fn handle_client(&self, user_id: Uuid, address: SocketAddr, websocket: WebSocket) {
        let frames_rx = self.subscribe(user_id).await;
        let (ws_tx, ws_rx) = websocket.split();

        WebSocketConnection::new(
            self.config.clone(),
            user_id,
            address,
            frames_rx,
            ws_tx,
            ws_rx,
        )
        .run()
        .await;

        self.unsubscribe(user_id).await;
    }

    async fn send(&self, user_id: Uuid, notification: output::Notification) {
        let frame = match Self::create_frame(notification) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::error!(%err, "failed to serialize push message");
                return;
            }
        };

        let connections = self.users_connections.read().await;
        let Some(tx) = connections.get(&user_id) else {
            tracing::debug!(%user_id, "user has no open websockets");
            return;
        };

        let count = tx.send(frame.clone()).unwrap_or(0);
        tracing::info!(
            notification_id = frame.notification_id,
            %user_id,
            count,
            "queued notification for websockets",
        );
    }

    async fn close_all_connections(&self) {
        let mut connections = self.users_connections.write().await;
        let count = connections.len();

        // Dropping senders closes every connection listening on them
        connections.clear();

        tracing::info!(count, "closed all users connections");
    }
}
