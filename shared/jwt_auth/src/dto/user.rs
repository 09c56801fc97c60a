use std::{ops::Deref, sync::Arc};
use uuid::Uuid;

///
/// Authenticated user retrieved from the bearer token.
///
/// Cloned into every request, so fields live behind an Arc
/// and are reachable through Deref.
///
#[derive(Clone, Debug)]
pub struct User {
    inner: Arc<InnerUser>,
}

#[derive(Debug)]
pub struct InnerUser {
    pub id: Uuid,
    pub roles: Vec<String>,
}

impl User {
    pub fn new(id: Uuid, roles: Vec<String>) -> Self {
        Self {
            inner: Arc::new(InnerUser { id, roles }),
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|user_role| user_role == role)
    }
}

impl Deref for User {
    type Target = InnerUser;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
