#![allow(dead_code)]

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use care_notifier_sync::{
    RestNotificationsService, RestNotificationsServiceConfig, WebSocketPushChannel,
    WebSocketPushChannelConfig,
};
use http::{header::AUTHORIZATION, HeaderMap};
use reqwest::Url;
use serde_json::{json, Value};
use std::{collections::HashMap, net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, sync::mpsc};

pub const TOKEN: &str = "test-token";

///
/// Serves router on an ephemeral port until the test ends
///
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    address
}

///
/// Address nothing listens on
///
pub async fn unused_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn rest_service(address: SocketAddr) -> RestNotificationsService {
    let base_url = Url::parse(&format!("http://{address}")).unwrap();

    RestNotificationsService::new(RestNotificationsServiceConfig {
        base_url,
        token: TOKEN.to_string(),
    })
}

pub fn push_channel(address: SocketAddr) -> WebSocketPushChannel {
    WebSocketPushChannel::new(WebSocketPushChannelConfig {
        url: format!("ws://{address}/ws/v1"),
        token: TOKEN.to_string(),
        buffer_size: 16,
    })
}

pub fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TOKEN}"))
}

pub fn notification_json(id: &str, minute: u32, is_read: bool) -> Value {
    json!({
        "id": id,
        "title": format!("title {id}"),
        "message": format!("message {id}"),
        "type": "info",
        "isRead": is_read,
        "createdAt": format!("2024-08-05T09:{minute:02}:00Z"),
    })
}

#[derive(Clone)]
struct PushServerState {
    events_tx: mpsc::UnboundedSender<String>,
    notifications: Arc<Vec<Value>>,
}

///
/// WebSocket endpoint that reports every received text frame and the closing
/// of the socket as events, and pushes `notifications` after the first frame
///
pub fn push_router(notifications: Vec<Value>) -> (Router, mpsc::UnboundedReceiver<String>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let state = PushServerState {
        events_tx,
        notifications: Arc::new(notifications),
    };

    let router = Router::new()
        .route("/ws/v1", get(websocket_upgrade))
        .with_state(state);

    (router, events_rx)
}

async fn websocket_upgrade(
    State(state): State<PushServerState>,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Response {
    if params.get("token").map(String::as_str) != Some(TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: PushServerState) {
    if let Some(Ok(Message::Text(text))) = socket.recv().await {
        let _ = state.events_tx.send(text);
    }

    for notification in state.notifications.iter() {
        let message = json!({ "type": "notification", "notification": notification });
        if socket.send(Message::Text(message.to_string())).await.is_err() {
            break;
        }
    }

    while let Some(Ok(message)) = socket.recv().await {
        if let Message::Close(_) = message {
            break;
        }
    }

    let _ = state.events_tx.send("closed".to_string());
}
