//!
//! Bearer token authentication shared by care-notifier services.
//!
//! Tokens are decoded by [JwtDecoder] into a [User] that HTTP handlers
//! receive through request extensions added by [JwtAuthLayer].
//!

mod dto;
pub mod error;
mod functions;
mod jwt_decoder;
mod middleware;
pub mod util;

pub use dto::User;
pub use functions::*;
pub use jwt_decoder::JwtDecoder;
pub use middleware::*;
