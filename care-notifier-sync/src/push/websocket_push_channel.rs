use super::{
    dto::{ClientMessage, WebSocketPushChannelConfig},
    websocket_reader::WebSocketReader,
    PushChannel, PushError,
};
use crate::dto::Notification;
use async_trait::async_trait;
use futures::SinkExt;
use tokio::sync::{broadcast, Mutex};
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

///
/// [PushChannel] over care-notifier-core websocket
///
pub struct WebSocketPushChannel {
    config: WebSocketPushChannelConfig,
    notifications_tx: broadcast::Sender<Notification>,
    reader: Mutex<Option<WebSocketReader>>,
}

impl WebSocketPushChannel {
    pub fn new(config: WebSocketPushChannelConfig) -> Self {
        let (notifications_tx, _) = broadcast::channel(config.buffer_size);

        Self {
            config,
            notifications_tx,
            reader: Mutex::new(None),
        }
    }

    fn url(&self) -> String {
        format!("{}?token={}", self.config.url, self.config.token)
    }
}

#[async_trait]
impl PushChannel for WebSocketPushChannel {
    #[tracing::instrument(name = "Push Channel", skip(self))]
    async fn connect(&self, user_id: Uuid) -> Result<(), PushError> {
        let mut reader = self.reader.lock().await;
        if let Some(previous) = reader.take() {
            previous.close().await;
        }

        tracing::info!("connecting");
        let (mut websocket, _) = tokio_tungstenite::connect_async(self.url()).await?;

        let join = serde_json::to_string(&ClientMessage::Join { user_id })?;
        websocket.send(Message::Text(join)).await?;
        tracing::info!("joined");

        *reader = Some(WebSocketReader::spawn(
            user_id,
            websocket,
            self.notifications_tx.clone(),
        ));

        Ok(())
    }

    fn on_notification(&self) -> broadcast::Receiver<Notification> {
        self.notifications_tx.subscribe()
    }

    async fn disconnect(&self) {
        let reader = self.reader.lock().await.take();
        match reader {
            Some(reader) => reader.close().await,
            None => tracing::debug!("push channel not connected"),
        }
    }
}
