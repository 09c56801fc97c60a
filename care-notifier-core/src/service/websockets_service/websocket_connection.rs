use super::{
    dto::{PushFrame, WebSocketsServiceConfig},
    error::Error,
    heartbeat::Heartbeat,
};
use crate::dto::input::ClientMessage;
use anyhow::anyhow;
use axum::extract::ws::Message;
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::{fmt::Display, net::SocketAddr, sync::Arc};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    time::{sleep_until, timeout_at, Instant},
};
use uuid::Uuid;

///
/// Single websocket of the user.
///
/// The user has to join first, afterwards notifications queued to
/// `frames_rx` are pushed and the peer is kept alive with pings.
///
pub struct WebSocketConnection<Tx, Rx> {
    config: Arc<WebSocketsServiceConfig>,

    user_id: Uuid,
    address: SocketAddr,

    frames_rx: broadcast::Receiver<Arc<PushFrame>>,
    ws_tx: Tx,
    ws_rx: Rx,

    heartbeat: Heartbeat,
}

impl<Tx, Rx, TxError, RxError> WebSocketConnection<Tx, Rx>
where
    Tx: Sink<Message, Error = TxError> + Unpin,
    Rx: Stream<Item = Result<Message, RxError>> + Unpin,
    TxError: Display,
    RxError: Display,
{
    pub fn new(
        config: Arc<WebSocketsServiceConfig>,
        user_id: Uuid,
        address: SocketAddr,
        frames_rx: broadcast::Receiver<Arc<PushFrame>>,
        ws_tx: Tx,
        ws_rx: Rx,
    ) -> Self {
        let heartbeat = Heartbeat::new(config.ping_interval);

        Self {
            config,
            user_id,
            address,
            frames_rx,
            ws_tx,
            ws_rx,
            heartbeat,
        }
    }

    #[tracing::instrument(
        name = "WebSocket",
        skip_all,
        fields(
            user_id = %self.user_id,
            address = %self.address,
        )
    )]
    pub async fn run(mut self) {
        let result = match self.join().await {
            Ok(()) => self.serve().await,
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => (),
            Err(Error::Close(reason)) => tracing::info!(reason, "closing websocket"),
            Err(Error::Anyhow(err)) => tracing::warn!(%err, "closing websocket"),
        }

        if let Err(err) = self.ws_tx.close().await {
            tracing::warn!(%err, "failed to close websocket");
        }
        tracing::info!("websocket closed");
    }

    ///
    /// Frames queued before the user joins wait in `frames_rx`
    ///
    async fn join(&mut self) -> Result<(), Error> {
        let deadline = Instant::now() + self.config.join_timeout;

        loop {
            let message = timeout_at(deadline, self.ws_rx.next())
                .await
                .map_err(|_| Error::Close("join timed out"))?;

            let Message::Text(text) = accept(message)? else {
                tracing::trace!("ignored control frame before join");
                continue;
            };

            let ClientMessage::Join { user_id } = serde_json::from_str(&text)
                .map_err(|err| anyhow!("invalid join message: {err}"))?;
            if user_id != self.user_id {
                return Err(Error::Close("joined user does not match token"));
            }

            tracing::info!("user joined");

            return Ok(());
        }
    }

    async fn serve(&mut self) -> Result<(), Error> {
        self.heartbeat.restart();

        loop {
            tokio::select! {
                biased;

                // Wait for time to ping the user
                _ = sleep_until(self.heartbeat.deadline()) => self.ping().await?,

                // Wait for frame from the user
                message = self.ws_rx.next() => match accept(message)? {
                    Message::Pong(payload) => self.heartbeat.pong(&payload)?,
                    Message::Text(_) => tracing::debug!("ignored text frame after join"),
                    _ => tracing::trace!("ignored control frame"),
                },

                // Wait for notification to push
                frame = self.frames_rx.recv() => self.push(frame).await?,
            }
        }
    }

    async fn ping(&mut self) -> Result<(), Error> {
        let payload = self
            .heartbeat
            .next_ping()
            .ok_or(Error::Close("user stopped answering pings"))?;

        self.ws_tx
            .send(Message::Ping(payload))
            .await
            .map_err(|err| anyhow!("failed to send ping: {err}"))?;
        tracing::trace!("ping sent");

        Ok(())
    }

    async fn push(&mut self, frame: Result<Arc<PushFrame>, RecvError>) -> Result<(), Error> {
        let frame = match frame {
            Ok(frame) => frame,
            Err(RecvError::Lagged(skipped)) => {
                return Err(anyhow!("websocket fell behind by {skipped} notifications").into());
            }
            Err(RecvError::Closed) => return Err(Error::Close("server is shutting down")),
        };

        self.ws_tx
            .send(Message::Text(frame.text.clone()))
            .await
            .map_err(|err| anyhow!("failed to push notification: {err}"))?;
        tracing::info!(notification_id = frame.notification_id, "pushed notification");

        Ok(())
    }
}

///
/// Frames the connection cannot continue after are turned into errors
///
fn accept<E: Display>(message: Option<Result<Message, E>>) -> Result<Message, Error> {
    match message {
        Some(Ok(Message::Close(_))) => Err(Error::Close("user closed websocket")),
        Some(Ok(Message::Binary(_))) => Err(Error::Close("binary frames are not supported")),
        Some(Ok(message)) => Ok(message),
        Some(Err(err)) => Err(anyhow!("failed to read frame: {err}").into()),
        None => Err(Error::Close("websocket stream ended")),
    }
}
