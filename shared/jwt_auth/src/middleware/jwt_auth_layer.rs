use super::jwt_auth_service::JwtAuthService;
use crate::JwtDecoder;
use tower::Layer;

///
/// Rejects requests without a valid bearer token with 401.
/// Accepted requests carry [crate::User] in their extensions.
///
#[derive(Clone)]
pub struct JwtAuthLayer {
    decoder: JwtDecoder,
}

impl JwtAuthLayer {
    pub fn new(decoder: JwtDecoder) -> Self {
        Self { decoder }
    }
}

impl<S> Layer<S> for JwtAuthLayer {
    type Service = JwtAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        JwtAuthService::new(inner, self.decoder.clone())
    }
}
