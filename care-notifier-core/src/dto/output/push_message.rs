use super::Notification;
use serde::Serialize;

///
/// Text frames sent to the user through websocket
///
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PushMessage {
    Notification { notification: Notification },
}
