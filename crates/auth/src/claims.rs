//! Session token claims

use serde::{Deserialize, Serialize};

/// Claims carried by a Huddle session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (UUID as string)
    pub sub: String,
    /// User email at issuance time
    pub email: String,
    /// Display name at issuance time
    pub name: String,
    /// Issued-at (unix seconds)
    pub iat: u64,
    /// Expiry (unix seconds)
    pub exp: u64,
    /// Issuer, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}
