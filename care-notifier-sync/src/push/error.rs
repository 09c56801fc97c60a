use tokio_tungstenite::tungstenite;

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
