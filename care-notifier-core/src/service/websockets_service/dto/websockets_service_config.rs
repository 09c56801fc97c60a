use std::time::Duration;

pub struct WebSocketsServiceConfig {
    pub ping_interval: Duration,

    /// Time the user has to send join message after upgrade
    pub join_timeout: Duration,

    /// Number of messages that can wait to be sent to the single user
    pub connection_buffer_size: usize,
}
