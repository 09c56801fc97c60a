use super::ApplicationEnv;
use crate::{
    repository::NotificationsRepositoryImpl,
    service::{
        notifications_service::{
            NotificationsService, NotificationsServiceConfig, NotificationsServiceImpl,
        },
        websockets_service::{WebSocketsService, WebSocketsServiceConfig, WebSocketsServiceImpl},
    },
};
use axum::extract::FromRef;
use jwt_auth::JwtDecoder;
use mongodb::{options::ClientOptions, Client};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub notifications_service: Arc<dyn NotificationsService>,
    pub websockets_service: Arc<dyn WebSocketsService>,
    pub jwt_decoder: JwtDecoder,
}

pub struct ApplicationStateToClose {
    pub db_client: Client,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_client_options = ClientOptions::parse(&env.db_connection_string).await?;
    let db_client = Client::with_options(db_client_options)?;
    let db = db_client.database(&env.db_name);

    tracing::info!("creating repositories");
    let notifications_repository = NotificationsRepositoryImpl::new(db).await?;
    let notifications_repository = Arc::new(notifications_repository);

    tracing::info!("creating services");
    let config = WebSocketsServiceConfig {
        ping_interval: env.websocket_ping_interval,
        join_timeout: env.websocket_join_timeout,
        connection_buffer_size: env.websocket_connection_buffer_size,
    };
    let websockets_service = WebSocketsServiceImpl::new(config);
    let websockets_service: Arc<dyn WebSocketsService> = Arc::new(websockets_service);

    let config = NotificationsServiceConfig {
        max_title_len: env.max_title_len,
        max_message_len: env.max_message_len,
    };
    let notifications_service = NotificationsServiceImpl::new(
        config,
        notifications_repository,
        websockets_service.clone(),
    );
    let notifications_service = Arc::new(notifications_service);

    let jwt_decoder = JwtDecoder::new(env.jwt_key.clone(), env.jwt_algorithms.clone());

    Ok((
        ApplicationState {
            notifications_service,
            websockets_service,
            jwt_decoder,
        },
        ApplicationStateToClose { db_client },
    ))
}
