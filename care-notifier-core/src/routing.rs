use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::Role,
    dto::{input, output},
    error::Error,
    service::{notifications_service::NotificationsService, websockets_service::WebSocketsService},
};
use axum::{
    extract::{ConnectInfo, Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::Response,
    routing::{delete, get, patch},
    Extension, Json, Router,
};
use bson::oid::ObjectId;
use jwt_auth::{require_all_roles, JwtDecoder, User};
use std::{net::SocketAddr, sync::Arc};

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route(
            "/api/v1/notifications",
            get(get_notifications)
                .post(create_notification)
                .delete(clear_all),
        )
        .route("/api/v1/notifications/read-all", patch(mark_all_read))
        .route("/api/v1/notifications/:id", delete(delete_notification))
        .route("/api/v1/notifications/:id/read", patch(mark_read))
        .route_layer(application_middleware.auth.clone())
        .route("/ws/v1", get(websocket_upgrade))
}

fn parse_notification_id(id: &str) -> Result<ObjectId, Error> {
    ObjectId::parse_str(id).map_err(|_| Error::InvalidNotificationId)
}

async fn get_notifications(
    State(service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<output::NotificationsList>, Error> {
    let notifications = service.find_notifications(user.id).await?;

    Ok(Json(notifications))
}

async fn create_notification(
    State(service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
    Json(notification): Json<input::Notification>,
) -> Result<(StatusCode, Json<output::NotificationId>), Error> {
    require_all_roles(&user, &[Role::ProduceNotifications.as_ref()])?;

    let id = service.save_notification(notification).await?;

    Ok((StatusCode::CREATED, Json(id)))
}

async fn mark_read(
    State(service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<output::Acknowledgement>, Error> {
    let id = parse_notification_id(&id)?;

    service.mark_read(id, user.id).await?;

    Ok(Json(output::Acknowledgement::ok()))
}

async fn mark_all_read(
    State(service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<output::Acknowledgement>, Error> {
    service.mark_all_read(user.id).await?;

    Ok(Json(output::Acknowledgement::ok()))
}

async fn delete_notification(
    State(service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<output::Acknowledgement>, Error> {
    let id = parse_notification_id(&id)?;

    service.delete_notification(id, user.id).await?;

    Ok(Json(output::Acknowledgement::ok()))
}

async fn clear_all(
    State(service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<output::Acknowledgement>, Error> {
    service.clear_all(user.id).await?;

    Ok(Json(output::Acknowledgement::ok()))
}

async fn websocket_upgrade(
    State(jwt_decoder): State<JwtDecoder>,
    State(websockets_service): State<Arc<dyn WebSocketsService>>,
    ConnectInfo(address): ConnectInfo<SocketAddr>,
    Query(token): Query<input::WebSocketToken>,
    ws: WebSocketUpgrade,
) -> Result<Response, Error> {
    let user = jwt_decoder
        .decode(&token.token)
        .map_err(Error::Unauthorized)?;
    let user_id = user.id;

    tracing::info!(%user_id, %address, "upgrading connection");

    Ok(ws.on_upgrade(move |socket| async move {
        websockets_service
            .handle_client(user_id, address, socket)
            .await
    }))
}
