use crate::dto::Notification;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PushMessage {
    Notification { notification: Notification },
}
