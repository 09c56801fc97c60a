mod acknowledgement;
mod notification;
mod notification_id;
mod notifications_list;
mod push_message;

pub use acknowledgement::*;
pub use notification::*;
pub use notification_id::*;
pub use notifications_list::*;
pub use push_message::*;
