pub mod notifications_service;
pub mod websockets_service;
