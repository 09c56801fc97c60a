use serde::Deserialize;

///
/// Query of the websocket upgrade request.
/// Browsers cannot set headers on websocket requests
/// so the bearer token travels in the query.
///
#[derive(Deserialize)]
pub struct WebSocketToken {
    pub token: String,
}
