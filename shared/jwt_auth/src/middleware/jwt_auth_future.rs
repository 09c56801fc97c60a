use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pin_project::pin_project;
use serde::Serialize;
use std::{
    future::Future,
    pin::Pin,
    task::{ready, Context, Poll},
};
use tracing::Span;

/// Same shape as every other error answered by the API
#[derive(Serialize)]
struct UnauthorizedBody {
    success: bool,
    message: &'static str,
}

#[pin_project(project = JwtAuthFutureProj)]
pub enum JwtAuthFuture<F> {
    Authorized {
        #[pin]
        inner: F,

        /// Carries the user into every event of the request
        span: Span,
    },
    Unauthorized,
}

impl<F, E> Future for JwtAuthFuture<F>
where
    F: Future<Output = Result<Response, E>>,
{
    type Output = Result<Response, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            JwtAuthFutureProj::Authorized { inner, span } => {
                let _entered = span.enter();
                let response = ready!(inner.poll(cx));
                Poll::Ready(response)
            }
            JwtAuthFutureProj::Unauthorized => {
                let body = UnauthorizedBody {
                    success: false,
                    message: "missing or invalid bearer token",
                };
                Poll::Ready(Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response()))
            }
        }
    }
}
