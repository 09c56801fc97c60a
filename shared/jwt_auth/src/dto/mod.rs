mod claims;
mod user;

pub(crate) use claims::Claims;
pub use user::User;
