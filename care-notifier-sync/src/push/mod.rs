mod dto;
mod error;
mod push_channel;
mod websocket_push_channel;
mod websocket_reader;

pub use dto::WebSocketPushChannelConfig;
pub use error::*;
pub use push_channel::*;
pub use websocket_push_channel::*;
