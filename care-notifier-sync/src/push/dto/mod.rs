mod client_message;
mod push_message;
mod websocket_push_channel_config;

pub use client_message::*;
pub use push_message::*;
pub use websocket_push_channel_config::*;
