use super::ApplicationEnv;
use jwt_auth::{JwtAuthLayer, JwtDecoder};
use tower_http::{
    limit::RequestBodyLimitLayer,
    trace::{HttpMakeClassifier, TraceLayer},
};

pub struct ApplicationMiddleware {
    pub auth: JwtAuthLayer,
    pub body_limit: RequestBodyLimitLayer,
    pub trace: TraceLayer<HttpMakeClassifier>,
}

pub fn create_middleware(env: &ApplicationEnv) -> ApplicationMiddleware {
    let decoder = JwtDecoder::new(env.jwt_key.clone(), env.jwt_algorithms.clone());
    let auth = JwtAuthLayer::new(decoder);

    let body_limit = RequestBodyLimitLayer::new(env.max_http_content_len);

    let trace = TraceLayer::new_for_http();

    ApplicationMiddleware {
        auth,
        body_limit,
        trace,
    }
}
