use crate::{error::MissingRoleError, User};

///
/// Validates that user has all required roles.
///
/// ### Errors
/// - [MissingRoleError] with the first role that is missing
///
pub fn require_all_roles(user: &User, roles: &[&str]) -> Result<(), MissingRoleError> {
    match roles.iter().find(|role| !user.has_role(role)) {
        Some(missing_role) => Err(MissingRoleError {
            missing_role: missing_role.to_string(),
        }),
        None => Ok(()),
    }
}
