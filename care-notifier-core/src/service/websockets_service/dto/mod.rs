mod push_frame;
mod websockets_service_config;

pub use push_frame::*;
pub use websockets_service_config::*;
