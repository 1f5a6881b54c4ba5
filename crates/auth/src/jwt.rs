//! Session token issuance, validation, and header extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::SessionClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::AuthIdentity;

/// Issue a signed session token for an authenticated user
pub fn issue_session_token(user: &AuthIdentity, config: &AuthConfig) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = SessionClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        iat: now,
        exp: now + config.token_ttl_secs,
        iss: config.issuer.clone(),
    };

    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
        tracing::error!(error = %e, "Failed to sign session token");
        AuthError::TokenIssueFailed
    })
}

/// Validate a session token and return its claims
pub(crate) fn validate_session_token(
    token: &str,
    config: &AuthConfig,
) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<SessionClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Session token validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}
