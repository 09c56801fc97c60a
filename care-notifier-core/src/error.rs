use crate::{dto::output, repository};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jwt_auth::error::MissingRoleError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("notification not exist")]
    NotificationNotExist,

    #[error("invalid notification id")]
    InvalidNotificationId,

    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("validation error: {field} too long {len}/{max_len}B")]
    ValidationTooLong {
        field: &'static str,
        len: usize,
        max_len: usize,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(anyhow::Error),

    #[error("auth error: {0}")]
    Auth(#[from] MissingRoleError),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let status = match self {
            Error::NotificationNotExist => StatusCode::NOT_FOUND,
            Error::InvalidNotificationId => StatusCode::BAD_REQUEST,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::ValidationTooLong { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Auth(_) => StatusCode::FORBIDDEN,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Database errors may contain connection details
        let message = match self {
            Error::Database(_) => "internal error".to_string(),
            err => err.to_string(),
        };

        (status, Json(output::Failure::new(message))).into_response()
    }
}
