use super::ApplicationStateToClose;
use crate::service::websockets_service::WebSocketsService;
use std::sync::Arc;

pub async fn close(state: ApplicationStateToClose) {
    tracing::info!("closing connection with database");
    state.db_client.shutdown().await;
    tracing::info!("closed connection with database");
}

///
/// Resolves after SIGINT or SIGTERM once every websocket was told to close.
/// Open websockets would keep graceful shutdown waiting forever.
///
pub async fn shutdown_signal(websockets_service: Arc<dyn WebSocketsService>) {
    tokio::select! {
        _ = ctrl_c() => {},
        _ = terminate() => {},
    }

    tracing::info!("starting shutdown");
    websockets_service.close_all_connections().await;
}

async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            terminate.recv().await;
        }
        Err(err) => {
            tracing::error!(%err, "failed to listen for SIGTERM");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
