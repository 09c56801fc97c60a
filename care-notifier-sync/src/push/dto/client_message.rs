use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Join {
        #[serde(rename = "userId")]
        user_id: Uuid,
    },
}
