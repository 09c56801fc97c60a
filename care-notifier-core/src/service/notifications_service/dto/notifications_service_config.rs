pub struct NotificationsServiceConfig {
    /// Max length of the title in bytes
    pub max_title_len: usize,

    /// Max length of the message in bytes
    pub max_message_len: usize,
}
