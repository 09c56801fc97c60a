///
/// Text frame queued to every open websocket of the recipient
///
pub struct PushFrame {
    pub notification_id: String,
    pub text: String,
}
