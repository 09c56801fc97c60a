use crate::dto::{Claims, User};
use anyhow::anyhow;
use axum::http::HeaderValue;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";

///
/// Decodes and validates JWTs issued for care-notifier users.
///
/// Cheap to clone, key and validation are shared.
///
#[derive(Clone)]
pub struct JwtDecoder {
    inner: Arc<JwtDecoderInner>,
}

struct JwtDecoderInner {
    key: DecodingKey,
    validation: Validation,
}

impl JwtDecoder {
    /// Algorithms must belong to the same family as the key
    pub fn new(key: DecodingKey, algorithms: Vec<Algorithm>) -> Self {
        let mut validation = Validation::default();
        validation.algorithms = algorithms;

        Self {
            inner: Arc::new(JwtDecoderInner { key, validation }),
        }
    }

    pub fn decode(&self, token: &str) -> anyhow::Result<User> {
        let token_data =
            jsonwebtoken::decode::<Claims>(token, &self.inner.key, &self.inner.validation)
                .map_err(|err| anyhow!("invalid jwt: {err}"))?;

        Ok(User::new(token_data.claims.sub, token_data.claims.roles))
    }

    pub fn decode_authorization_header(
        &self,
        authorization_header: Option<&HeaderValue>,
    ) -> anyhow::Result<User> {
        let Some(authorization_header) = authorization_header else {
            return Err(anyhow!("missing Authorization header"));
        };
        let Ok(authorization_value) = authorization_header.to_str() else {
            return Err(anyhow!("illegal character in Authorization header"));
        };
        let Some(token) = authorization_value.strip_prefix(BEARER_PREFIX) else {
            return Err(anyhow!("unsupported authorization type"));
        };

        self.decode(token)
    }
}
