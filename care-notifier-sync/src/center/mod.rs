mod notification_center;
mod push_listener;

pub use notification_center::*;
