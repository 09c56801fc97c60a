use crate::dto::output;
use axum::{async_trait, extract::ws::WebSocket};
use std::net::SocketAddr;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WebSocketsService: Send + Sync {
    ///
    /// Serve websocket of the user until it gets closed.
    ///
    async fn handle_client(&self, user_id: Uuid, address: SocketAddr, websocket: WebSocket);

    ///
    /// Push notification to all open websockets of the user.
    /// Users without open websockets are skipped.
    ///
    async fn send(&self, user_id: Uuid, notification: output::Notification);

    ///
    /// Close every open websocket.
    ///
    async fn close_all_connections(&self);
}
