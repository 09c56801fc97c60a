pub struct WebSocketPushChannelConfig {
    /// WebSocket endpoint of care-notifier-core, e.g. `ws://127.0.0.1:8080/ws/v1`
    pub url: String,

    /// Bearer token of the signed in user
    pub token: String,

    /// Number of pushed notifications a slow receiver can fall behind
    pub buffer_size: usize,
}
