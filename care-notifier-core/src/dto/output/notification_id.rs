use serde::Serialize;

#[derive(Serialize)]
pub struct NotificationId {
    pub success: bool,
    pub id: String,
}
