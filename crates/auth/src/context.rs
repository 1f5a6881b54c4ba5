//! Authenticated request context

use uuid::Uuid;

use crate::types::AuthIdentity;

/// Context attached to an authenticated request.
///
/// Carries the identity only. Team roles are authorization data and are
/// re-queried per operation, never cached here.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}
