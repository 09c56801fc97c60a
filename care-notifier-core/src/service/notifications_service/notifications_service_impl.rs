use super::{NotificationsService, NotificationsServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    repository::{self, NotificationsRepository},
    service::websockets_service::WebSocketsService,
};
use axum::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct NotificationsServiceImpl {
    config: NotificationsServiceConfig,
    repository: Arc<dyn NotificationsRepository>,
    websockets_service: Arc<dyn WebSocketsService>,
}

impl NotificationsServiceImpl {
    pub fn new(
        config: NotificationsServiceConfig,
        repository: Arc<dyn NotificationsRepository>,
        websockets_service: Arc<dyn WebSocketsService>,
    ) -> Self {
        Self {
            config,
            repository,
            websockets_service,
        }
    }

    fn validate_save_notification(&self, notification: &input::Notification) -> Result<(), Error> {
        if notification.title.trim().is_empty() {
            return Err(Error::Validation("title cannot be blank"));
        }

        Self::validate_not_too_long("title", &notification.title, self.config.max_title_len)?;
        Self::validate_not_too_long(
            "message",
            &notification.message,
            self.config.max_message_len,
        )?;

        Ok(())
    }

    fn validate_not_too_long(field: &'static str, value: &str, max_len: usize) -> Result<(), Error> {
        if value.len() > max_len {
            return Err(Error::ValidationTooLong {
                field,
                len: value.len(),
                max_len,
            });
        }

        Ok(())
    }

    fn map_not_exist(err: repository::Error) -> Error {
        match err {
            repository::Error::NoDocumentUpdated => Error::NotificationNotExist,
            err => Error::Database(err),
        }
    }
}

#[async_trait]
impl NotificationsService for NotificationsServiceImpl {
    async fn save_notification(
        &self,
        notification: input::Notification,
    ) -> Result<output::NotificationId, Error> {
        tracing::info!(user_id = %notification.user_id, "creating notification");
        tracing::trace!(?notification);

        self.validate_save_notification(&notification)?;

        let created_at = OffsetDateTime::now_utc();
        let id = self
            .repository
            .insert(
                notification.user_id,
                created_at,
                &notification.title,
                &notification.message,
                notification.kind.as_ref(),
            )
            .await?;

        let id = id.to_hex();
        tracing::info!(id, "created notification");

        let pushed = output::Notification {
            id: id.clone(),
            title: notification.title,
            message: notification.message,
            kind: notification.kind.as_ref().to_string(),
            is_read: false,
            created_at,
        };
        self.websockets_service
            .send(notification.user_id, pushed)
            .await;

        Ok(output::NotificationId { success: true, id })
    }

    async fn find_notifications(&self, user_id: Uuid) -> Result<output::NotificationsList, Error> {
        tracing::info!("finding notifications");

        let notifications = self.repository.find_many(user_id).await?;
        let unread_count = notifications
            .iter()
            .filter(|notification| !notification.is_read)
            .count();
        tracing::info!(
            count = notifications.len(),
            unread_count,
            "found notifications"
        );

        let notifications = notifications
            .into_iter()
            .map(output::Notification::from)
            .collect();

        Ok(output::NotificationsList {
            success: true,
            notifications,
            unread_count,
        })
    }

    async fn mark_read(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error> {
        tracing::info!("marking notification as read");

        self.repository
            .update_read(id, user_id)
            .await
            .map_err(Self::map_not_exist)?;

        tracing::info!("marked notification as read");

        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<(), Error> {
        tracing::info!("marking all notifications as read");

        let count = self.repository.update_many_read(user_id).await?;

        tracing::info!(count, "marked all notifications as read");

        Ok(())
    }

    async fn delete_notification(&self, id: ObjectId, user_id: Uuid) -> Result<(), Error> {
        tracing::info!("deleting notification");

        self.repository
            .delete(id, user_id)
            .await
            .map_err(Self::map_not_exist)?;

        tracing::info!("deleted notification");

        Ok(())
    }

    async fn clear_all(&self, user_id: Uuid) -> Result<(), Error> {
        tracing::info!("deleting all notifications");

        let count = self.repository.delete_many(user_id).await?;

        tracing::info!(count, "deleted all notifications");

        Ok(())
    }
}
