mod client_message;
mod notification;
mod websocket_token;

pub use client_message::*;
pub use notification::*;
pub use websocket_token::*;
