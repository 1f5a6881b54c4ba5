//! Lightweight identity types used by the auth layer

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Authenticated user identity (read model — lightweight subset of User).
///
/// The password hash is deliberately excluded so it can never be
/// serialized into a response.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
