mod dto;
mod error;
mod remote_notifications_service;
mod rest_notifications_service;

pub use dto::RestNotificationsServiceConfig;
pub use error::*;
pub use remote_notifications_service::*;
pub use rest_notifications_service::*;
