mod envelope;
mod list_body;
mod rest_notifications_service_config;

pub use envelope::*;
pub use list_body::*;
pub use rest_notifications_service_config::*;
