use super::{
    dto::{Envelope, ListBody},
    RemoteError, RemoteNotificationsService, RestNotificationsServiceConfig,
};
use crate::dto::{NotificationId, NotificationsList};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

const NOTIFICATIONS_PATH: [&str; 3] = ["api", "v1", "notifications"];

///
/// [RemoteNotificationsService] talking JSON with care-notifier-core
///
pub struct RestNotificationsService {
    config: RestNotificationsServiceConfig,
    client: Client,
}

impl RestNotificationsService {
    pub fn new(config: RestNotificationsServiceConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: RestNotificationsServiceConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.config.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(NOTIFICATIONS_PATH)
                .extend(segments);
        }

        url
    }

    async fn execute<T>(&self, request: RequestBuilder) -> Result<T, RemoteError>
    where
        T: DeserializeOwned,
    {
        let response = request.bearer_auth(&self.config.token).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope = serde_json::from_slice::<Envelope>(&bytes);

        if !status.is_success() {
            let message = envelope
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| status.to_string());

            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = envelope?;
        if !envelope.success {
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "remote service reported failure".to_string()),
            });
        }

        let body = serde_json::from_slice(&bytes)?;

        Ok(body)
    }
}

#[async_trait]
impl RemoteNotificationsService for RestNotificationsService {
    async fn list(&self) -> Result<NotificationsList, RemoteError> {
        tracing::debug!("listing notifications");

        let body = self
            .execute::<ListBody>(self.client.get(self.url(&[])))
            .await?;

        tracing::debug!(count = body.notifications.len(), "listed notifications");

        Ok(body.into())
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<(), RemoteError> {
        tracing::debug!(%id, "marking notification as read");

        self.execute::<Envelope>(self.client.patch(self.url(&[id.as_str(), "read"])))
            .await?;

        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), RemoteError> {
        tracing::debug!("marking all notifications as read");

        self.execute::<Envelope>(self.client.patch(self.url(&["read-all"])))
            .await?;

        Ok(())
    }

    async fn delete(&self, id: &NotificationId) -> Result<(), RemoteError> {
        tracing::debug!(%id, "deleting notification");

        self.execute::<Envelope>(self.client.delete(self.url(&[id.as_str()])))
            .await?;

        Ok(())
    }

    async fn clear_all(&self) -> Result<(), RemoteError> {
        tracing::debug!("deleting all notifications");

        self.execute::<Envelope>(self.client.delete(self.url(&[])))
            .await?;

        Ok(())
    }
}
