//! Authentication configuration

/// Configuration for session-token issuance and validation
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for HS256 signing
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    /// Optional expected issuer claim
    pub issuer: Option<String>,
}

impl AuthConfig {
    pub fn new(jwt_secret: String, token_ttl_secs: u64) -> Self {
        Self {
            jwt_secret,
            token_ttl_secs,
            issuer: None,
        }
    }
}
